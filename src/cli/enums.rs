//! CLI enum types.

use clap::ValueEnum;

use crate::ascii::SymbolSet;

/// Named symbol set for calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Standard,
    Blocks,
    Minimal,
    Detailed,
}

impl From<CharacterSet> for SymbolSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => SymbolSet::Standard,
            CharacterSet::Blocks => SymbolSet::Blocks,
            CharacterSet::Minimal => SymbolSet::Minimal,
            CharacterSet::Detailed => SymbolSet::Detailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_to_symbol_set() {
        assert_eq!(SymbolSet::from(CharacterSet::Standard), SymbolSet::Standard);
        assert_eq!(SymbolSet::from(CharacterSet::Blocks), SymbolSet::Blocks);
        assert_eq!(SymbolSet::from(CharacterSet::Minimal), SymbolSet::Minimal);
        assert_eq!(SymbolSet::from(CharacterSet::Detailed), SymbolSet::Detailed);
    }
}
