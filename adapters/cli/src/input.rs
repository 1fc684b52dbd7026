//! Maps raw key names and script letters onto simulation intents.

use orb_maze_core::{Direction, Intent};

/// Translates a keyboard key name into an intent.
///
/// Unrecognised keys map to [`Intent::None`].
pub(crate) fn intent_for_key(key: &str) -> Intent {
    match key.trim_end_matches(&['\r', '\n'][..]) {
        "ArrowUp" | "w" | "W" => Intent::Move(Direction::Up),
        "ArrowDown" | "s" | "S" => Intent::Move(Direction::Down),
        "ArrowLeft" | "a" | "A" => Intent::Move(Direction::Left),
        "ArrowRight" | "d" | "D" => Intent::Move(Direction::Right),
        " " | "space" | "Space" => Intent::Use,
        _ => Intent::None,
    }
}

/// Parses a compact script such as `RRD_..L` into one intent per letter.
///
/// Whitespace is skipped; any other unknown letter becomes an idle tick.
pub(crate) fn parse_script(script: &str) -> Vec<Intent> {
    script
        .chars()
        .filter(|letter| !letter.is_whitespace())
        .map(|letter| match letter.to_ascii_uppercase() {
            'U' => Intent::Move(Direction::Up),
            'D' => Intent::Move(Direction::Down),
            'L' => Intent::Move(Direction::Left),
            'R' => Intent::Move(Direction::Right),
            'B' | '_' => Intent::Use,
            _ => Intent::None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_follow_browser_conventions() {
        assert_eq!(intent_for_key("ArrowUp"), Intent::Move(Direction::Up));
        assert_eq!(intent_for_key("s"), Intent::Move(Direction::Down));
        assert_eq!(intent_for_key("a"), Intent::Move(Direction::Left));
        assert_eq!(intent_for_key("ArrowRight\n"), Intent::Move(Direction::Right));
        assert_eq!(intent_for_key(" "), Intent::Use);
        assert_eq!(intent_for_key("space"), Intent::Use);
        assert_eq!(intent_for_key("Escape"), Intent::None);
    }

    #[test]
    fn script_letters_map_one_to_one() {
        assert_eq!(
            parse_script("R d _ . B x"),
            vec![
                Intent::Move(Direction::Right),
                Intent::Move(Direction::Down),
                Intent::Use,
                Intent::None,
                Intent::Use,
                Intent::None,
            ]
        );
    }
}
