use chrono::Local;
use serde::Serialize;

use crate::energy::EnergyOutputs;
use crate::ledger::LedgerView;
use crate::models::Profile;

/// Flat, display-ready snapshot interpolated into the daily-coach prompt.
/// Every field is already a string; the prompt template just drops them in.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryPayload {
    pub date: String,
    pub user_profile: String,
    pub goal: String,
    pub bmi: String,
    pub calorie_target: String,
    pub adjusted_calorie_target: String,
    pub logged_meals_summary: String,
    pub total_consumption: String,
    pub logged_workouts_summary: String,
    pub calories_burned: String,
    pub water: String,
}

/// Assemble the coach summary from the profile, the energy model outputs,
/// and a ledger snapshot. Pure formatting: numbers become `{:.0}` strings,
/// entry lists are "; "-joined, and empty lists read "None".
pub fn build_summary(
    profile: &Profile,
    energy: &EnergyOutputs,
    view: &LedgerView,
) -> SummaryPayload {
    let meals: Vec<String> = view
        .meals
        .iter()
        .flat_map(|(slot, entries)| {
            entries
                .iter()
                .map(move |e| format!("{}: {}", slot, e.description))
        })
        .collect();
    let workouts: Vec<String> = view
        .workouts
        .iter()
        .map(|w| w.description.clone())
        .collect();

    SummaryPayload {
        date: Local::now().format("%Y-%m-%d").to_string(),
        user_profile: profile.describe(),
        goal: profile.goal.to_string(),
        bmi: format!("{:.1} ({})", energy.bmi, energy.bmi_category),
        calorie_target: format!("{:.0} kcal", energy.calorie_target),
        adjusted_calorie_target: format!("{:.0} kcal", view.adjusted_calorie_target),
        logged_meals_summary: join_or_none(&meals),
        total_consumption: format!(
            "{:.0} kcal consumed ({:.0}g protein, {:.0}g carbs, {:.0}g fats)",
            view.totals.calories, view.totals.protein_g, view.totals.carbs_g, view.totals.fats_g
        ),
        logged_workouts_summary: join_or_none(&workouts),
        calories_burned: format!("{:.0} kcal", view.calories_burned_total),
        water: format!("{} ml", view.water_ml_total),
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join("; ")
    }
}
