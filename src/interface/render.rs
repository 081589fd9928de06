use crate::dashboard::DashboardSummary;
use crate::forecast::monthly_projection;
use crate::models::{Attendance, Feedback, ForecastResult, MealContext};
use crate::state::CanteenStateManager;

fn display_prep_sheet(result: &ForecastResult) {
    if result.prep_sheet.is_empty() {
        println!("Prep sheet:  (none, low-confidence estimate)");
        return;
    }

    println!("Prep sheet:");
    let width = result.prep_sheet.keys().map(|k| k.len()).max().unwrap_or(4);
    for (ingredient, kg) in &result.prep_sheet {
        println!("  {:<width$}  {:>8.2} kg", ingredient, kg, width = width);
    }
}

/// Display a standalone forecast.
pub fn display_forecast(ctx: &MealContext, result: &ForecastResult, savings: f64, currency: &str) {
    println!();
    println!("=== Forecast: {} on {} ===", ctx.meal_type, ctx.date);
    println!();
    println!("Predicted headcount: {}", result.predicted_headcount);
    println!("Confidence:          {:.2}", result.confidence_score);
    println!("Model status:        {}", result.model_status);
    display_prep_sheet(result);
    println!("Projected savings:   {:.0} {}", savings, currency);
    println!();
}

/// Display the manager dashboard.
pub fn display_dashboard(summary: &DashboardSummary, monthly_multiplier: u32) {
    let live = &summary.live_data;
    let ai = &summary.ai_predictions;
    let money = &summary.financials;

    println!();
    println!(
        "=== Dashboard: {} on {} ===",
        summary.meal_details.meal_type, summary.meal_details.date
    );
    println!();
    println!("--- Live ---");
    println!("Registered students: {}", live.total_students);
    println!("Skipped:             {}", live.skipped_students);
    println!("Live headcount:      {}", live.live_headcount);
    println!();
    println!("--- Forecast ---");
    println!("Predicted headcount: {}", ai.predicted_headcount);
    println!("Confidence:          {:.2}", ai.confidence_score);
    println!("Model status:        {}", ai.model_status);
    display_prep_sheet(ai);
    println!();
    println!("--- Financials ---");
    println!(
        "Projected savings:   {:.0} {} per meal",
        money.projected_savings, money.currency
    );
    println!(
        "Monthly projection:  {:.0} {} (x{})",
        monthly_projection(money.projected_savings, monthly_multiplier),
        money.currency,
        monthly_multiplier
    );
    println!();
}

/// List skip records with user and menu names resolved.
pub fn display_attendance(records: &[&Attendance], manager: &CanteenStateManager) {
    if records.is_empty() {
        println!("Skipped meals: (none)");
        return;
    }

    println!();
    println!("=== Skipped Meals ({}) ===", records.len());
    for a in records {
        let email = manager
            .users()
            .iter()
            .find(|u| u.id == a.user_id)
            .map(|u| u.email.as_str())
            .unwrap_or("?");
        let menu = manager
            .menu_by_id(a.menu_id)
            .map(|m| m.describe())
            .unwrap_or_else(|| format!("menu #{}", a.menu_id));
        println!(
            "  {} skipped {} ({:?}, {})",
            email,
            menu,
            a.status,
            a.timestamp.format("%Y-%m-%d %H:%M")
        );
    }
    println!();
}

/// List feedback with item names resolved.
pub fn display_feedback(records: &[&Feedback], manager: &CanteenStateManager) {
    if records.is_empty() {
        println!("Feedback: (none)");
        return;
    }

    println!();
    println!("=== Feedback ({}) ===", records.len());
    for f in records {
        let item = manager
            .menu_item_by_id(f.item_id)
            .map(|i| i.name.as_str())
            .unwrap_or("?");
        let comments = if f.comments.is_empty() {
            String::new()
        } else {
            format!(": {}", f.comments)
        };
        println!("  {} {}/5{}", item, f.rating, comments);
    }
    println!();
}
