//! Small helpers for terminal output.

use std::io::Write;

use cardtable_engine::cards::Card;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Space-separated card labels, or `-` for an empty pile.
pub fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardtable_engine::cards::{Rank, Suit};

    #[test]
    fn empty_piles_show_a_dash() {
        assert_eq!(format_cards(&[]), "-");
    }

    #[test]
    fn cards_are_space_separated() {
        let cards = [
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Hearts, Rank::Ten),
        ];
        let text = format_cards(&cards);
        assert_eq!(text.split(' ').count(), 2);
        assert_eq!(text, format!("{} {}", cards[0], cards[1]));
    }

    #[test]
    fn errors_are_prefixed() {
        let mut buf = Vec::new();
        write_error(&mut buf, "bad seat").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Error: bad seat\n");
    }
}
