//! English plural forms for storage names.

use convert_case::{Case, Casing};

///
/// IRREGULAR
/// singular -> plural pairs that do not follow any suffix rule
///

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("louse", "lice"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

///
/// UNCOUNTABLE
///

const UNCOUNTABLE: &[&str] = &[
    "deer",
    "equipment",
    "fish",
    "information",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

// words ending in -f/-fe that take -ves
const VES: &[&str] = &[
    "calf", "elf", "half", "knife", "leaf", "life", "loaf", "self", "shelf", "thief", "wife",
    "wolf",
];

// words ending in -o that take -es
const OES: &[&str] = &["echo", "hero", "potato", "tomato", "torpedo", "veto"];

/// Pluralize an identifier into its flat lower-case plural.
///
/// Only the last word changes, and the tables match whole words only:
/// `SalesPerson` becomes `salespeople`, while `price` and `blouse` take the
/// regular suffix.
#[must_use]
pub fn pluralize(ident: &str) -> String {
    let snake = ident.to_case(Case::Snake);
    let (head, last) = snake.rsplit_once('_').unwrap_or(("", snake.as_str()));
    let head: String = head.chars().filter(|c| *c != '_').collect();

    format!("{head}{}", plural_word(last))
}

// plural_word
// `word` is a single lower-case word
fn plural_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }

    if VES.contains(&word) {
        let head = word.trim_end_matches("fe").trim_end_matches('f');
        return format!("{head}ves");
    }

    if OES.contains(&word) {
        return format!("{word}es");
    }

    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }

    if let Some(stem) = word.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        return format!("{stem}ies");
    }

    format!("{word}s")
}
