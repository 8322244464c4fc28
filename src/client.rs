use thiserror::Error;
use tracing::warn;

use crate::energy::EnergyOutputs;
use crate::extract::{parse_nutrition, parse_workout, ParseError};
use crate::gemini::GeminiClient;
use crate::ledger::{InvalidInput, Ledger, LedgerView};
use crate::models::{MealSlot, NutritionDelta, Profile, WaterSource};
use crate::summary::{build_summary, SummaryPayload};

/// Milliliters added by the one-glass quick-add button.
pub const GLASS_ML: u32 = 250;

/// Why a user action was not applied to the ledger.
///
/// Every variant is handled at the action that caused it; the ledger is
/// left exactly as it was.
#[derive(Debug, Error)]
pub enum CoachError {
    /// Rejected before any model call was made.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// The model responded but no usable payload could be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Advice needs something to talk about.
    #[error("log at least one meal before asking for advice")]
    NoMealsLogged,
    /// The model call itself failed (network, auth, quota).
    #[error("text generation failed: {0}")]
    Upstream(#[from] anyhow::Error),
}

/// Session facade: one user, one ledger, one model connection.
///
/// Each logging method is a single round trip: validate the input, ask the
/// model, decode its answer, append to the ledger. Any failure along the
/// way returns before the append, so the ledger only ever sees complete,
/// validated entries.
pub struct DietCoachClient {
    gemini: GeminiClient,
    profile: Profile,
    ledger: Ledger,
}

impl DietCoachClient {
    /// Start an empty session for a profile.
    pub fn new(gemini: GeminiClient, profile: Profile) -> Self {
        Self {
            gemini,
            profile,
            ledger: Ledger::new(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Replace the profile wholesale. The ledger is untouched; targets
    /// derived from the profile change from the next snapshot on.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Energy-model outputs for the current profile.
    pub fn energy(&self) -> EnergyOutputs {
        EnergyOutputs::for_profile(&self.profile)
    }

    /// Current dashboard numbers at the profile's calorie target.
    pub fn dashboard(&self) -> LedgerView {
        self.ledger.snapshot(self.energy().calorie_target)
    }

    /// The coach summary for the current session state.
    pub fn summary(&self) -> SummaryPayload {
        let energy = self.energy();
        let view = self.ledger.snapshot(energy.calorie_target);
        build_summary(&self.profile, &energy, &view)
    }

    /// Analyze a meal description and fold the estimate into the ledger.
    ///
    /// Returns the nutrition estimate that was appended.
    pub async fn log_meal(
        &mut self,
        slot: MealSlot,
        description: &str,
    ) -> Result<NutritionDelta, CoachError> {
        if description.trim().is_empty() {
            return Err(InvalidInput::EmptyDescription.into());
        }
        let response = self.gemini.generate(&meal_prompt(description)).await?;
        ingest_meal_response(&mut self.ledger, slot, description, &response)
    }

    /// Analyze a workout description and add its burn to the ledger.
    ///
    /// Returns the estimated kcal burned.
    pub async fn log_workout(&mut self, description: &str) -> Result<f64, CoachError> {
        if description.trim().is_empty() {
            return Err(InvalidInput::EmptyDescription.into());
        }
        let prompt = workout_prompt(description, &self.profile);
        let response = self.gemini.generate(&prompt).await?;
        ingest_workout_response(&mut self.ledger, description, &response)
    }

    /// Quick-add one glass of water.
    pub fn log_water_glass(&mut self) -> Result<(), CoachError> {
        Ok(self.ledger.append_water(WaterSource::Glass, GLASS_ML)?)
    }

    /// Add an arbitrary amount of water in milliliters.
    pub fn log_water(&mut self, milliliters: u32) -> Result<(), CoachError> {
        Ok(self.ledger.append_water(WaterSource::Bulk, milliliters)?)
    }

    /// One round of coaching advice over everything logged so far.
    ///
    /// The response is display text; it is not parsed.
    pub async fn advice(&self) -> Result<String, CoachError> {
        if self.ledger.meal_count() == 0 {
            return Err(CoachError::NoMealsLogged);
        }
        let summary = self.summary();
        Ok(self.gemini.generate(&coach_prompt(&summary)).await?)
    }
}

/// Fold a meal-analyzer response into the ledger. Decoding happens before
/// any mutation, so a bad response leaves the ledger untouched.
fn ingest_meal_response(
    ledger: &mut Ledger,
    slot: MealSlot,
    description: &str,
    response: &str,
) -> Result<NutritionDelta, CoachError> {
    let nutrition = match parse_nutrition(response) {
        Ok(n) => n,
        Err(e) => {
            warn!(slot = %slot, error = %e, "discarding meal response");
            return Err(e.into());
        }
    };
    ledger.append_meal(slot, description, nutrition)?;
    Ok(nutrition)
}

/// Fold a workout-analyzer response into the ledger; same all-or-nothing
/// rule as meals.
fn ingest_workout_response(
    ledger: &mut Ledger,
    description: &str,
    response: &str,
) -> Result<f64, CoachError> {
    let calories_burned = match parse_workout(response) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "discarding workout response");
            return Err(e.into());
        }
    };
    ledger.append_workout(description, calories_burned)?;
    Ok(calories_burned)
}

fn meal_prompt(description: &str) -> String {
    format!(
        "You are a nutrition analysis expert. Analyze the following meal description and \
         provide a reasonable estimate for its nutritional content. Your response MUST be \
         ONLY a JSON object with the keys 'calories', 'protein_g', 'carbs_g', and 'fats_g'.\n\n\
         Meal: {description}\n\nJSON Output:"
    )
}

fn workout_prompt(description: &str, profile: &Profile) -> String {
    format!(
        "You are a fitness expert. Analyze the following workout description and the user's \
         profile to provide a reasonable estimate for calories burned. The user's profile is: \
         {profile}. Your response MUST be ONLY a JSON object with the key 'calories_burned'.\n\n\
         Workout: {description}\n\nJSON Output:",
        profile = profile.describe(),
    )
}

fn coach_prompt(summary: &SummaryPayload) -> String {
    format!(
        "You are an encouraging and helpful AI Diet Coach. Your goal is to provide actionable \
         insights and suggestions based on the user's progress today. Keep your tone positive \
         and motivating.\n\n\
         Here is the user's data for today ({date}):\n\
         ------------------------\n\
         User Profile: {user_profile}\n\
         BMI: {bmi}\n\
         Primary Goal: {goal}\n\
         Original Daily Calorie Target: {calorie_target}\n\
         Workouts Logged Today: {logged_workouts_summary}\n\
         Calories Burned from Workouts: {calories_burned}\n\
         Adjusted Daily Calorie Target (Original + Burned): {adjusted_calorie_target}\n\
         Meals Logged Today: {logged_meals_summary}\n\
         Total Consumption Today: {total_consumption}\n\
         Water Logged Today: {water}\n\
         ------------------------\n\n\
         Based on all the information above, please provide the following in a clear, \
         structured Markdown format:\n\
         1. **Insight:** A brief, positive analysis of their progress. Mention their workout \
         and compare their consumption to their *Adjusted Calorie Target*.\n\
         2. **Next Meal Suggestion:** Suggest a specific, healthy meal or snack suitable for \
         their remaining calories.\n\
         3. **Recovery Tip:** A short tip related to their workout, like stretching or \
         hydration.",
        date = summary.date,
        user_profile = summary.user_profile,
        bmi = summary.bmi,
        goal = summary.goal,
        calorie_target = summary.calorie_target,
        logged_workouts_summary = summary.logged_workouts_summary,
        calories_burned = summary.calories_burned,
        adjusted_calorie_target = summary.adjusted_calorie_target,
        logged_meals_summary = summary.logged_meals_summary,
        total_consumption = summary.total_consumption,
        water = summary.water,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, Goal};

    fn profile() -> Profile {
        Profile {
            age: 30,
            gender: Gender::Male,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Maintenance,
        }
    }

    #[test]
    fn good_meal_response_appends_and_accumulates() {
        let mut ledger = Ledger::new();
        let response =
            "```json\n{\"calories\": 450, \"protein_g\": 20, \"carbs_g\": 60, \"fats_g\": 10}\n```";
        let delta =
            ingest_meal_response(&mut ledger, MealSlot::Lunch, "a chicken wrap", response)
                .unwrap();

        assert_eq!(delta.calories, 450.0);
        assert_eq!(ledger.meals(MealSlot::Lunch).len(), 1);
        assert_eq!(ledger.totals().calories, 450.0);
    }

    #[test]
    fn garbled_meal_response_appends_nothing() {
        let mut ledger = Ledger::new();
        let err = ingest_meal_response(
            &mut ledger,
            MealSlot::Lunch,
            "a chicken wrap",
            "Sorry, I cannot help with that.",
        )
        .unwrap_err();

        assert!(matches!(err, CoachError::Parse(ParseError::NotFound)));
        assert_eq!(ledger.meal_count(), 0);
        assert_eq!(ledger.totals().calories, 0.0);
    }

    #[test]
    fn malformed_meal_json_appends_nothing() {
        let mut ledger = Ledger::new();
        let err =
            ingest_meal_response(&mut ledger, MealSlot::Dinner, "pasta", "{calories: lots}")
                .unwrap_err();

        assert!(matches!(err, CoachError::Parse(ParseError::Malformed(_))));
        assert_eq!(ledger.meal_count(), 0);
    }

    #[test]
    fn workout_response_with_string_number() {
        let mut ledger = Ledger::new();
        let burned = ingest_workout_response(
            &mut ledger,
            "30 minutes of jogging",
            "{\"calories_burned\": \"300\"}",
        )
        .unwrap();

        assert_eq!(burned, 300.0);
        assert_eq!(ledger.calories_burned_total(), 300.0);
    }

    #[test]
    fn water_logging_needs_no_model() {
        let gemini = GeminiClient::new("unused".to_string());
        let mut coach = DietCoachClient::new(gemini, profile());

        coach.log_water_glass().unwrap();
        coach.log_water(500).unwrap();
        assert_eq!(coach.ledger().water_ml_total(), GLASS_ML + 500);

        assert!(matches!(
            coach.log_water(0).unwrap_err(),
            CoachError::InvalidInput(InvalidInput::ZeroWater)
        ));
    }

    #[tokio::test]
    async fn advice_requires_a_logged_meal() {
        // Bails out before touching the network when nothing is logged.
        let gemini = GeminiClient::new("unused".to_string());
        let coach = DietCoachClient::new(gemini, profile());

        assert_eq!(coach.summary().logged_meals_summary, "None");
        let err = coach.advice().await.unwrap_err();
        assert!(matches!(err, CoachError::NoMealsLogged));
    }

    #[test]
    fn prompts_carry_the_inputs() {
        let meal = meal_prompt("two eggs on toast");
        assert!(meal.contains("Meal: two eggs on toast"));
        assert!(meal.contains("'calories', 'protein_g', 'carbs_g', and 'fats_g'"));

        let workout = workout_prompt("a 5k run", &profile());
        assert!(workout.contains("Workout: a 5k run"));
        assert!(workout.contains("Age: 30, Gender: Male, Weight: 70kg"));
        assert!(workout.contains("'calories_burned'"));
    }

    #[test]
    fn profile_swap_keeps_the_ledger() {
        let gemini = GeminiClient::new("unused".to_string());
        let mut coach = DietCoachClient::new(gemini, profile());
        coach.log_water(300).unwrap();

        let mut heavier = profile();
        heavier.weight_kg = 80.0;
        heavier.goal = Goal::WeightLoss;
        coach.set_profile(heavier);

        assert_eq!(coach.ledger().water_ml_total(), 300);
        let energy = coach.energy();
        assert!((energy.calorie_target - (energy.tdee - 500.0)).abs() < 1e-9);
    }
}
