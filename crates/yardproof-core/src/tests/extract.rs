use super::{filler, product_block};
use crate::*;

fn window() -> ExtractOptions {
    ExtractOptions::default()
}

fn blocks() -> ExtractOptions {
    ExtractOptions {
        strategy: ExtractStrategy::Blocks,
        ..ExtractOptions::default()
    }
}

#[test]
fn extract_single_product_end_to_end() {
    let text = product_block(
        "Titanic Princess Castle | Family Fun Rentals",
        "20' L x 20' W x 15' H",
        Some("13' L x 13' W x 15' H"),
    );
    let records = extract_products(&text, &window());
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, 1);
    assert_eq!(record.name, "Titanic Princess Castle");
    assert_eq!(record.category, Category::BounceHouse);
    assert_eq!(record.setup_area.unwrap().area, 400.0);
    assert_eq!(record.actual_size.unwrap().area, 169.0);
}

#[test]
fn extract_keeps_document_order_and_sequential_ids() {
    let mut text = String::new();
    for (title, setup) in [
        ("Alpha Castle", "10 x 10"),
        ("Bravo Bouncer", "12 x 14"),
        ("Charlie Jumper", "15 x 15 x 12"),
    ] {
        text.push_str(&product_block(title, setup, Some("9 x 9")));
        text.push_str(&filler(6000));
    }

    for options in [window(), blocks()] {
        let records = extract_products(&text, &options);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alpha Castle", "Bravo Bouncer", "Charlie Jumper"]);
        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
}

#[test]
fn extract_drops_incomplete_candidates_without_burning_ids() {
    let mut text = String::new();
    text.push_str("<li><strong>Setup Area:</strong> 30 x 30</li><li><strong>Actual Size:</strong> 20 x 20</li>");
    text.push_str(&filler(9000));
    text.push_str(&product_block("First Castle", "10 x 10", Some("8 x 8")));
    text.push_str(&filler(9000));
    text.push_str(&product_block("No Actual Castle", "10 x 10", None));
    text.push_str(&filler(9000));
    text.push_str(&product_block("Bad Setup Castle", "TBD", Some("8 x 8")));
    text.push_str(&filler(9000));
    text.push_str(&product_block("Last Castle", "11 x 11", Some("9 x 9")));

    for options in [window(), blocks()] {
        let report = Extractor::new(options).extract(&text);
        assert_eq!(report.markers_found, 5);
        assert_eq!(report.discarded(), 3);
        let got: Vec<(u32, &str)> = report
            .records
            .iter()
            .map(|r| (r.id, r.name.as_str()))
            .collect();
        assert_eq!(got, [(1, "First Castle"), (2, "Last Castle")]);
        assert!(
            report
                .records
                .iter()
                .all(|r| r.setup_area.is_some() && r.actual_size.is_some())
        );
    }
}

#[test]
fn window_only_searches_near_its_marker() {
    let mut text = product_block("Lonely Castle", "10 x 10", None);
    text.push_str(&filler(4000));
    text.push_str("<strong>Actual Size:</strong> 8 x 8");

    assert!(extract_products(&text, &window()).is_empty());

    let wide = ExtractOptions {
        window_after: 5000,
        ..window()
    };
    assert_eq!(extract_products(&text, &wide).len(), 1);
}

#[test]
fn window_takes_first_title_in_range_while_blocks_take_their_own() {
    let mut text = product_block("Shark Bouncer", "10 x 10", Some("8 x 8"));
    text.push_str(&product_block("Frozen Castle", "20 x 20", Some("18 x 18")));

    let windowed = extract_products(&text, &window());
    let names: Vec<&str> = windowed.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Shark Bouncer", "Shark Bouncer"]);
    assert_eq!(windowed[1].actual_size.unwrap().length, 8.0);

    let blocked = extract_products(&text, &blocks());
    let names: Vec<&str> = blocked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Shark Bouncer", "Frozen Castle"]);
    assert_eq!(blocked[1].actual_size.unwrap().length, 18.0);
}

#[test]
fn category_comes_from_the_surrounding_text() {
    let text = product_block("Tropical Splash", "30 x 12", Some("28 x 10"));
    let records = extract_products(&text, &window());
    assert_eq!(records[0].category, Category::Other);

    let text = product_block("Tropical Water Slide", "30 x 12", Some("28 x 10"));
    let records = extract_products(&text, &blocks());
    assert_eq!(records[0].category, Category::WaterSlide);
}

#[test]
fn extract_reads_plain_text_exports() {
    let text = "Title: Dora Castle - Fun Rental\nSetup Area: 15′ L × 15′ W\nActual Size: 13′ L × 13′ W × 12′ H\n";
    let records = extract_products(text, &window());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Dora Castle");
    assert_eq!(records[0].actual_size.unwrap().height, Some(12.0));
}

#[test]
fn extract_reads_values_wrapped_onto_the_next_line() {
    let text = "<div class=\"item\">Title[_sep2_]\n  Wrapped Castle | Co[_sep1_]Description[_sep2_]\n<ul>\n<li><strong>Setup Area:</strong>\n  20' L x 20' W x 15' H</li>\n<li><strong>Actual Size:</strong>\r\n  13' L x 13' W x 15' H\n</li>\n</ul></div>\n";

    for options in [window(), blocks()] {
        let report = Extractor::new(options).extract(text);
        assert_eq!(report.markers_found, 1);
        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.name, "Wrapped Castle");
        assert_eq!(record.setup_area.unwrap().area, 400.0);
        assert_eq!(record.actual_size.unwrap().area, 169.0);
    }
}

#[test]
fn title_without_slug_characters_is_still_extracted() {
    let text = product_block("!!! | Castle Co", "10 x 10", Some("8 x 8"));
    for options in [window(), blocks()] {
        let records = extract_products(&text, &options);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "!!!");
        assert_eq!(records[0].category, Category::BounceHouse);
        assert_eq!(slugify(&records[0].name), "");
    }
}

#[test]
fn extract_options_follow_config() {
    let cfg = PipelineConfig::from_json_str(
        r#"{ "extract": { "strategy": "blocks", "windowBefore": 10 } }"#,
    )
    .unwrap();
    let options = ExtractOptions::from_config(&cfg).unwrap();
    assert_eq!(options.strategy, ExtractStrategy::Blocks);
    assert_eq!(options.window_before, 10);
    assert_eq!(options.window_after, 3000);

    let cfg = PipelineConfig::from_json_str(r#"{ "extract": { "strategy": "nearest" } }"#).unwrap();
    let err = ExtractOptions::from_config(&cfg).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
}

#[test]
fn extract_output_serializes_as_plain_records() {
    let text = product_block("Elmo Castle", "15 x 15", Some("13 x 13 x 12"));
    let records = extract_products(&text, &window());
    assert_eq!(
        serde_json::to_value(&records).unwrap(),
        serde_json::json!([{
            "id": 1,
            "name": "Elmo Castle",
            "category": "bounce_house",
            "setup_area": { "length": 15.0, "width": 15.0, "height": null, "area": 225.0 },
            "actual_size": { "length": 13.0, "width": 13.0, "height": 12.0, "area": 169.0 }
        }])
    );
}
