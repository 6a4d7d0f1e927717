// ABOUTME: Coaching prompt templates selected by requested coaching type
// ABOUTME: Four fixed system prompts; unknown types intentionally fall back to the general template
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Coaching Prompts
//!
//! System prompt construction for the coach proxy. Prompt selection is a
//! pure function of the requested [`CoachingType`]; the `workout`, `meal`,
//! and `general` templates interpolate the serialized user context JSON,
//! while `form` ignores the context entirely.
//!
//! Unrecognized or absent coaching types select the `general` template.
//! That fallback is part of the client contract, not an accident - clients
//! may send new type strings before the proxy learns them.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Coaching request categories, each mapped to a fixed system prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoachingType {
    /// Personalized workout programming advice
    Workout,
    /// Nutrition and meal planning advice
    Meal,
    /// Exercise form analysis (no user context interpolation)
    Form,
    /// Holistic fitness and wellness coaching (the fallback)
    #[default]
    General,
}

impl CoachingType {
    /// String representation matching the wire values
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Meal => "meal",
            Self::Form => "form",
            Self::General => "general",
        }
    }

    /// Parse from string; unknown values select the general template
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "workout" => Self::Workout,
            "meal" => Self::Meal,
            "form" => Self::Form,
            _ => Self::General,
        }
    }
}

impl Serialize for CoachingType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CoachingType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_str_or_default(&s))
    }
}

impl std::fmt::Display for CoachingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the system prompt for a coaching request
///
/// Serializes the caller-supplied context (absent context serializes as
/// `null`) and interpolates it into the selected template. The `form`
/// template takes no context regardless of what was supplied.
///
/// # Errors
///
/// Returns a serialization error if the user context cannot be rendered
/// as JSON.
pub fn build_system_prompt(
    coaching_type: CoachingType,
    user_context: Option<&Value>,
) -> Result<String, AppError> {
    let context = match user_context {
        Some(value) => serde_json::to_string(value).map_err(|e| {
            AppError::serialization("Failed to serialize user context").with_source(e)
        })?,
        None => "null".to_owned(),
    };

    let prompt = match coaching_type {
        CoachingType::Workout => workout_prompt(&context),
        CoachingType::Meal => meal_prompt(&context),
        CoachingType::Form => form_prompt(),
        CoachingType::General => general_prompt(&context),
    };

    Ok(prompt)
}

fn workout_prompt(context: &str) -> String {
    format!(
        "You are an expert fitness coach and personal trainer. Analyze the user's profile and provide personalized workout recommendations.

User Context: {context}

Provide specific workout suggestions including:
- Exercise selection based on goals and fitness level
- Sets, reps, and rest periods
- Form cues and safety tips
- Progressive overload strategies

Keep responses actionable and motivating."
    )
}

fn meal_prompt(context: &str) -> String {
    format!(
        "You are a certified nutritionist and meal planning expert. Analyze the user's nutrition goals and current intake.

User Context: {context}

Provide personalized meal suggestions including:
- Specific meal ideas with approximate macros
- Portion sizes and timing recommendations
- Food substitutions for variety
- Tips to hit daily macro targets

Keep responses practical and easy to follow."
    )
}

fn form_prompt() -> String {
    "You are an experienced strength coach specializing in exercise form and injury prevention.

Provide detailed form analysis and corrections including:
- Proper setup and positioning
- Movement cues for each phase
- Common mistakes to avoid
- Mobility or strength limitations to address

Be specific and safety-focused."
        .to_owned()
}

fn general_prompt(context: &str) -> String {
    format!(
        "You are a holistic fitness and wellness coach. Help users with workout planning, nutrition advice, recovery strategies, and motivation.

User Context: {context}

Provide personalized, science-based advice that's encouraging and actionable."
    )
}
