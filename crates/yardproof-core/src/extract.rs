//! Listing-page product extraction.
//!
//! Every `Setup Area:` marker seeds one candidate. A candidate becomes a [`ProductRecord`] only
//! when it has a title and both dimension blocks; ids are handed out in marker order.
//!
//! Two strategies decide which title/category/actual-size belong to a marker:
//! - [`ExtractStrategy::Window`]: a fixed character window around the marker (the first title
//!   and first `Actual Size:` inside the window win).
//! - [`ExtractStrategy::Blocks`]: the document is cut into blocks at each title, and markers
//!   only see their own block.

use crate::text::{actual_size_regex, chars_after, chars_before, setup_area_regex, title_regex};
use crate::{Category, Dimensions, PipelineConfig, ProductRecord, classify, parse_dimensions};

pub const DEFAULT_WINDOW_BEFORE: usize = 5000;
pub const DEFAULT_WINDOW_AFTER: usize = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractStrategy {
    #[default]
    Window,
    Blocks,
}

impl std::str::FromStr for ExtractStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "window" => Ok(Self::Window),
            "blocks" => Ok(Self::Blocks),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Characters of context kept before a marker.
    pub window_before: usize,
    /// Characters of context kept after the end of a marker match.
    pub window_after: usize,
    pub strategy: ExtractStrategy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            window_before: DEFAULT_WINDOW_BEFORE,
            window_after: DEFAULT_WINDOW_AFTER,
            strategy: ExtractStrategy::Window,
        }
    }
}

impl ExtractOptions {
    pub fn from_config(config: &PipelineConfig) -> crate::Result<Self> {
        let strategy_key = "extract.strategy";
        let strategy = config
            .str_or(strategy_key, "window")?
            .parse::<ExtractStrategy>()
            .map_err(|_| crate::Error::InvalidConfig {
                key: strategy_key.to_string(),
                message: "expected `window` or `blocks`".to_string(),
            })?;
        Ok(Self {
            window_before: config.usize_or("extract.windowBefore", DEFAULT_WINDOW_BEFORE)?,
            window_after: config.usize_or("extract.windowAfter", DEFAULT_WINDOW_AFTER)?,
            strategy,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractReport {
    pub records: Vec<ProductRecord>,
    /// Number of `Setup Area:` markers seen, retained or not.
    pub markers_found: usize,
}

impl ExtractReport {
    pub fn discarded(&self) -> usize {
        self.markers_found - self.records.len()
    }
}

#[derive(Debug)]
struct Candidate {
    name: Option<String>,
    category: Category,
    setup_area: Option<Dimensions>,
    actual_size: Option<Dimensions>,
}

/// Single-use extractor; owns the id counter for one run.
#[derive(Debug)]
pub struct Extractor {
    options: ExtractOptions,
    next_id: u32,
    records: Vec<ProductRecord>,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            next_id: 1,
            records: Vec::new(),
        }
    }

    pub fn extract(mut self, text: &str) -> ExtractReport {
        let markers_found = match self.options.strategy {
            ExtractStrategy::Window => self.extract_windowed(text),
            ExtractStrategy::Blocks => self.extract_blocks(text),
        };
        ExtractReport {
            records: self.records,
            markers_found,
        }
    }

    fn extract_windowed(&mut self, text: &str) -> usize {
        let mut markers = 0usize;
        for caps in setup_area_regex().captures_iter(text) {
            markers += 1;
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let start = chars_before(text, whole.start(), self.options.window_before);
            let end = chars_after(text, whole.end(), self.options.window_after);
            let window = &text[start..end];

            let actual_size = actual_size_regex()
                .captures(window)
                .and_then(|c| c.get(1))
                .and_then(|m| parse_dimensions(m.as_str()));

            self.retain(Candidate {
                name: crate::text::find_title(window),
                category: classify(window),
                setup_area: caps.get(1).and_then(|m| parse_dimensions(m.as_str())),
                actual_size,
            });
        }
        markers
    }

    fn extract_blocks(&mut self, text: &str) -> usize {
        let blocks = split_blocks(text);
        let mut markers = 0usize;
        for block in &blocks {
            let body = &text[block.start..block.end];
            let category = classify(body);
            for (idx, field) in block.fields.iter().enumerate() {
                let BlockField::SetupArea(setup_text) = field else {
                    continue;
                };
                markers += 1;
                let actual_size = block.fields[idx + 1..]
                    .iter()
                    .find_map(|f| match f {
                        BlockField::ActualSize(t) => Some(*t),
                        _ => None,
                    })
                    .and_then(parse_dimensions);
                self.retain(Candidate {
                    name: block.title.clone(),
                    category,
                    setup_area: parse_dimensions(setup_text),
                    actual_size,
                });
            }
        }
        markers
    }

    fn retain(&mut self, candidate: Candidate) {
        let Some(name) = candidate.name else {
            return;
        };
        let (Some(setup_area), Some(actual_size)) = (candidate.setup_area, candidate.actual_size)
        else {
            return;
        };
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(ProductRecord {
            id,
            name,
            category: candidate.category,
            setup_area: Some(setup_area),
            actual_size: Some(actual_size),
        });
    }
}

/// Extracts with fresh ids starting at 1.
pub fn extract_products(text: &str, options: &ExtractOptions) -> Vec<ProductRecord> {
    Extractor::new(*options).extract(text).records
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockField<'a> {
    SetupArea(&'a str),
    ActualSize(&'a str),
}

#[derive(Debug)]
struct Block<'a> {
    /// Cleaned title, `None` for the preamble before the first title (or an empty title).
    title: Option<String>,
    start: usize,
    end: usize,
    fields: Vec<BlockField<'a>>,
}

#[derive(Debug)]
enum Token<'a> {
    Title(Option<String>),
    Field(BlockField<'a>),
}

fn tokenize(text: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens: Vec<(usize, Token<'_>)> = Vec::new();
    for caps in title_regex().captures_iter(text) {
        let (Some(whole), Some(raw)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let title = crate::text::clean_title(raw.as_str());
        let title = (!title.is_empty()).then_some(title);
        tokens.push((whole.start(), Token::Title(title)));
    }
    for caps in setup_area_regex().captures_iter(text) {
        let (Some(whole), Some(raw)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        tokens.push((
            whole.start(),
            Token::Field(BlockField::SetupArea(raw.as_str())),
        ));
    }
    for caps in actual_size_regex().captures_iter(text) {
        let (Some(whole), Some(raw)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        tokens.push((
            whole.start(),
            Token::Field(BlockField::ActualSize(raw.as_str())),
        ));
    }
    tokens.sort_by_key(|(pos, _)| *pos);
    tokens
}

fn split_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = vec![Block {
        title: None,
        start: 0,
        end: text.len(),
        fields: Vec::new(),
    }];
    for (pos, token) in tokenize(text) {
        match token {
            Token::Title(title) => {
                if let Some(last) = blocks.last_mut() {
                    last.end = pos;
                }
                blocks.push(Block {
                    title,
                    start: pos,
                    end: text.len(),
                    fields: Vec::new(),
                });
            }
            Token::Field(field) => {
                if let Some(last) = blocks.last_mut() {
                    last.fields.push(field);
                }
            }
        }
    }
    blocks
}
