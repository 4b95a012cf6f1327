use bingolink_core::CONTENT_CELLS;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Seeds for new boards. A seed forced from the url is used once, then random ones.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct SeedSource {
    forced: Option<u64>,
}

impl SeedSource {
    pub(crate) fn new(forced: Option<u64>) -> Self {
        Self { forced }
    }

    pub(crate) fn next_with(&mut self, random: impl FnOnce() -> u64) -> u64 {
        self.forced.take().unwrap_or_else(random)
    }

    pub(crate) fn next(&mut self) -> u64 {
        self.next_with(js_random_seed)
    }
}

/// Splits the editor text into board entries, one per non-blank line.
pub(crate) fn parse_draft(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub(crate) fn format_draft(lines: &[String]) -> String {
    lines.join("\n")
}

/// Short status for the editor, `None` once there are exactly enough entries.
pub(crate) fn draft_status(count: usize) -> Option<String> {
    match count.cmp(&CONTENT_CELLS) {
        std::cmp::Ordering::Less => Some(format!("{} more needed", CONTENT_CELLS - count)),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(format!("{} too many", count - CONTENT_CELLS)),
    }
}
