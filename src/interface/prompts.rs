use dialoguer::{Confirm, Select};
use strsim::jaro_winkler;

use crate::error::{CanteenError, Result};
use crate::models::{MAX_RATING, MIN_RATING, MenuItem};

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Menu items resembling `input`, best match first (at most five).
pub fn fuzzy_candidates<'a>(items: &'a [MenuItem], input: &str) -> Vec<&'a MenuItem> {
    let needle = input.trim().to_lowercase();
    let mut scored: Vec<(&MenuItem, f64)> = items
        .iter()
        .map(|i| (i, jaro_winkler(&i.key(), &needle)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(5).map(|(i, _)| i).collect()
}

/// Resolve a typed item name to a known menu item, asking when it is ambiguous.
pub fn resolve_menu_item(items: &[MenuItem], input: &str) -> Result<String> {
    let needle = input.trim().to_lowercase();
    if let Some(item) = items.iter().find(|i| i.key() == needle) {
        return Ok(item.name.clone());
    }

    let candidates = fuzzy_candidates(items, input);
    match candidates.as_slice() {
        [] => Err(CanteenError::MenuItemNotFound(input.to_string())),
        [only] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", only.name))
                .default(true)
                .interact()?;
            if confirm {
                Ok(only.name.clone())
            } else {
                Err(CanteenError::MenuItemNotFound(input.to_string()))
            }
        }
        many => {
            let mut options: Vec<String> = many.iter().map(|i| i.name.clone()).collect();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            if selection < many.len() {
                Ok(many[selection].name.clone())
            } else {
                Err(CanteenError::MenuItemNotFound(input.to_string()))
            }
        }
    }
}

/// Prompt for a rating between 1 and 5.
pub fn prompt_rating(item_name: &str) -> Result<u8> {
    let options: Vec<String> = (MIN_RATING..=MAX_RATING)
        .map(|r| format!("{} {}", r, "*".repeat(r as usize)))
        .collect();

    let selection = Select::new()
        .with_prompt(format!("Rate '{}'", item_name))
        .items(&options)
        .default(2)
        .interact()?;

    Ok(MIN_RATING + selection as u8)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<MenuItem> {
        ["Dal Tadka", "Dal Makhani", "Basmati Rice", "Raita"]
            .iter()
            .enumerate()
            .map(|(i, name)| MenuItem {
                id: i as u32 + 1,
                name: name.to_string(),
                category: "Main".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_exact_match_needs_no_prompt() {
        assert_eq!(resolve_menu_item(&items(), "basmati rice").unwrap(), "Basmati Rice");
    }

    #[test]
    fn test_fuzzy_candidates_ranked() {
        let items = items();
        let candidates = fuzzy_candidates(&items, "dal tadk");
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0].name, "Dal Tadka");
    }

    #[test]
    fn test_no_candidates_is_not_found() {
        let err = resolve_menu_item(&items(), "zzzzzz").unwrap_err();
        assert!(matches!(err, CanteenError::MenuItemNotFound(_)));
    }
}
