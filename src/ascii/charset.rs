//! Built-in symbol sets for palette calibration.
//!
//! Order within a set does not matter: calibration measures and sorts the
//! symbols against the active font.

/// Standard ASCII density ramp (10 levels).
pub const STANDARD_SYMBOLS: &str = " .:-=+*#%@";

/// Unicode shade blocks (5 levels).
/// Needs a font that covers U+2591..U+2593 and U+2588.
pub const BLOCKS_SYMBOLS: &str = " ░▒▓█";

/// Minimal set (4 levels) for a clean, less noisy look.
pub const MINIMAL_SYMBOLS: &str = " .:#";

/// Long ASCII ramp (70 levels) for fine gradients.
pub const DETAILED_SYMBOLS: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Named symbol set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolSet {
    #[default]
    Standard,
    Blocks,
    Minimal,
    Detailed,
}

impl SymbolSet {
    /// Symbols of this set.
    pub fn symbols(&self) -> &'static str {
        match self {
            SymbolSet::Standard => STANDARD_SYMBOLS,
            SymbolSet::Blocks => BLOCKS_SYMBOLS,
            SymbolSet::Minimal => MINIMAL_SYMBOLS,
            SymbolSet::Detailed => DETAILED_SYMBOLS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SymbolSet::Standard => "standard",
            SymbolSet::Blocks => "blocks",
            SymbolSet::Minimal => "minimal",
            SymbolSet::Detailed => "detailed",
        }
    }

    /// Look a set up by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "standard" => Some(SymbolSet::Standard),
            "blocks" => Some(SymbolSet::Blocks),
            "minimal" => Some(SymbolSet::Minimal),
            "detailed" => Some(SymbolSet::Detailed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard() {
        assert_eq!(SymbolSet::default().symbols(), " .:-=+*#%@");
    }

    #[test]
    fn test_name_round_trip() {
        for set in [
            SymbolSet::Standard,
            SymbolSet::Blocks,
            SymbolSet::Minimal,
            SymbolSet::Detailed,
        ] {
            assert_eq!(SymbolSet::from_name(set.name()), Some(set));
        }
        assert_eq!(SymbolSet::from_name("BLOCKS"), Some(SymbolSet::Blocks));
        assert_eq!(SymbolSet::from_name("braille"), None);
    }

    #[test]
    fn test_detailed_has_no_duplicates() {
        let mut chars: Vec<char> = DETAILED_SYMBOLS.chars().collect();
        let len = chars.len();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), len);
    }
}
