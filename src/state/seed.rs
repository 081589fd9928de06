use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::error::Result;
use crate::models::{MealType, Role};
use crate::state::manager::{CanteenStateManager, SkipOutcome};

/// Demo catalogue as (name, category).
const DEMO_ITEMS: [(&str, &str); 14] = [
    ("Poha with Tea", "Breakfast"),
    ("Idli Sambar", "Breakfast"),
    ("Aloo Paratha", "Breakfast"),
    ("Paneer Butter Masala", "Main"),
    ("Dal Tadka", "Main"),
    ("Rajma Chawal", "Main"),
    ("Chole Bhature", "Main"),
    ("Basmati Rice", "Main"),
    ("Roti", "Main"),
    ("Dal Makhani", "Main"),
    ("Mixed Veg Curry", "Main"),
    ("Garden Salad", "Side"),
    ("Raita", "Side"),
    ("Pickle", "Side"),
];

pub const DEMO_MANAGER_EMAIL: &str = "manager@university.edu";

/// Counts of what a seeding run added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub students_created: usize,
    pub menus_created: usize,
    pub skips_recorded: usize,
}

fn demo_menu(meal_type: MealType) -> Vec<String> {
    let picks: &[usize] = match meal_type {
        MealType::Breakfast => &[0, 1],
        MealType::Lunch => &[3, 7, 11],
        MealType::Dinner => &[9, 7, 12],
    };
    picks.iter().map(|&i| DEMO_ITEMS[i].0.to_string()).collect()
}

pub fn student_email(n: usize) -> String {
    format!("student{:04}@university.edu", n)
}

/// Populate a store with a day of demo data.
///
/// Creates the item catalogue, the three menus for `date`, `students`
/// student accounts plus one manager, and up to `skips_per_meal` random
/// skips per meal. Existing records are left alone.
pub fn seed_demo_data(
    manager: &mut CanteenStateManager,
    students: usize,
    skips_per_meal: usize,
    date: NaiveDate,
    rng: &mut impl Rng,
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for (name, category) in DEMO_ITEMS {
        manager.add_menu_item(name, category);
    }

    for meal_type in MealType::ALL {
        if manager.find_menu(date, meal_type).is_none() {
            manager.create_menu(date, meal_type, &demo_menu(meal_type))?;
            summary.menus_created += 1;
        }
    }

    for n in 1..=students {
        let email = student_email(n);
        if manager.find_user(&email).is_none() {
            manager.register_user(&email, Role::Student)?;
            summary.students_created += 1;
        }
    }

    if manager.find_user(DEMO_MANAGER_EMAIL).is_none() {
        manager.register_user(DEMO_MANAGER_EMAIL, Role::Manager)?;
    }

    let emails: Vec<String> = manager
        .users()
        .iter()
        .filter(|u| u.role == Role::Student)
        .map(|u| u.email.clone())
        .collect();
    let count = skips_per_meal.min(emails.len());

    for meal_type in MealType::ALL {
        let skipping: Vec<&String> = emails.choose_multiple(&mut *rng, count).collect();
        for email in skipping {
            if manager.skip_meal(email, date, meal_type)? == SkipOutcome::Recorded {
                summary.skips_recorded += 1;
            }
        }
        info!("{}: {} skipped, {} attending", meal_type, count, emails.len() - count);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CanteenState;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[test]
    fn test_seed_counts() {
        let mut manager = CanteenStateManager::new(CanteenState::default());
        let mut rng = StdRng::seed_from_u64(7);
        let summary = seed_demo_data(&mut manager, 50, 20, date(), &mut rng).unwrap();

        assert_eq!(summary.students_created, 50);
        assert_eq!(summary.menus_created, 3);
        assert_eq!(summary.skips_recorded, 60);
        assert_eq!(manager.student_count(), 50);
        assert_eq!(manager.menu_items().len(), DEMO_ITEMS.len());

        let lunch = manager.find_menu(date(), MealType::Lunch).unwrap();
        assert_eq!(lunch.items.len(), 3);
        assert_eq!(manager.skip_count(lunch.id), 20);
    }

    #[test]
    fn test_skips_capped_by_roster() {
        let mut manager = CanteenStateManager::new(CanteenState::default());
        let mut rng = StdRng::seed_from_u64(7);
        seed_demo_data(&mut manager, 5, 200, date(), &mut rng).unwrap();

        let dinner = manager.find_menu(date(), MealType::Dinner).unwrap();
        assert_eq!(manager.skip_count(dinner.id), 5);
    }

    #[test]
    fn test_reseed_is_idempotent_for_accounts() {
        let mut manager = CanteenStateManager::new(CanteenState::default());
        let mut rng = StdRng::seed_from_u64(1);
        seed_demo_data(&mut manager, 10, 0, date(), &mut rng).unwrap();
        let again = seed_demo_data(&mut manager, 10, 0, date(), &mut rng).unwrap();

        assert_eq!(again, SeedSummary::default());
        assert_eq!(manager.users().len(), 11);
    }
}
