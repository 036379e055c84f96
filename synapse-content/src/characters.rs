//! The ten people who can walk into the facility.
//!
//! Each profile trades sanity against awareness: the child starts nearly
//! untouched and nearly blind, the patient arrives half-broken and
//! half-knowing. Abilities are referenced by the conditional events and the
//! character achievements; belongings are defined in [`crate::items`].

use synapse_core::content::CharacterProfile;
use synapse_core::types::{CharacterId, ItemId};
use synapse_core::ContentRegistry;

#[allow(clippy::too_many_arguments)]
fn profile(
    id: &str,
    name: &str,
    profession: &str,
    background: &str,
    description: &str,
    starting_sanity: i32,
    starting_awareness: i32,
    abilities: &[&str],
    items: &[&str],
) -> CharacterProfile {
    CharacterProfile {
        id: CharacterId::new(id),
        name: name.to_string(),
        profession: profession.to_string(),
        background: background.to_string(),
        description: description.to_string(),
        starting_sanity,
        starting_awareness,
        abilities: abilities.iter().map(|a| (*a).to_string()).collect(),
        items: items.iter().map(|i| ItemId::new(*i)).collect(),
    }
}

fn roster() -> Vec<CharacterProfile> {
    vec![
        profile(
            "data-analyst",
            "Dr. Sarah Chen",
            "Senior Data Analyst",
            "Corporate Whistleblower",
            "A senior analyst who found impossible numbers in Nexus Corp's research \
             ledgers and reported them. The invitation to tour the facility arrived the \
             next morning.",
            75,
            85,
            &["data_analysis", "pattern_recognition", "technical_intuition"],
            &["encrypted_drive", "company_keycard", "research_notes"],
        ),
        profile(
            "security-guard",
            "Marcus Torres",
            "Night Security Supervisor",
            "Accidental Witness",
            "The facility's night supervisor, the only person on shift when the evacuation \
             order went out. He came back to find out why his name was not on the list.",
            85,
            70,
            &["tactical_awareness", "protective_instinct", "security_knowledge"],
            &["security_badge", "family_photo", "service_pistol"],
        ),
        profile(
            "intern",
            "Alex Rivera",
            "Research Intern",
            "Ambitious Overachiever",
            "A graduate intern two semesters from a doctorate, thrilled to be assigned to \
             the decade's most important AI project. Nobody explained why the internship \
             paid so well.",
            90,
            60,
            &["quick_learning", "tech_savvy", "youthful_resilience"],
            &["student_id", "laptop_computer", "research_journal"],
        ),
        profile(
            "patient",
            "Eleanor Voss",
            "Clinical Patient",
            "Terminal Illness Volunteer",
            "A retired philosophy lecturer with a terminal diagnosis who volunteered for \
             experimental cognitive preservation. She has read enough to suspect what the \
             consent form actually said.",
            60,
            95,
            &["philosophical_insight", "identity_awareness", "mental_flexibility"],
            &["philosophical_texts", "medical_records", "wedding_ring"],
        ),
        profile(
            "hacker",
            "Zero",
            "Anonymous Hacker",
            "Corporate Infiltrator",
            "An anonymous infiltrator who has spent three years inside Nexus Corp's \
             networks without leaving a trace. Tonight is the first time the target \
             invited them in.",
            70,
            90,
            &["system_manipulation", "encryption_skills", "network_navigation"],
            &["encrypted_hard_drive", "custom_hardware", "anonymization_tools"],
        ),
        profile(
            "executive",
            "James Crawford",
            "Nexus Corp Executive",
            "Corporate Insider",
            "A Nexus Corp executive who approved the SYNAPSE budget line by line. He has \
             come to see what the line items bought.",
            65,
            75,
            &["insider_knowledge", "executive_access", "resource_awareness"],
            &["executive_keycard", "corporate_documents", "family_photos"],
        ),
        profile(
            "journalist",
            "Maria Santos",
            "Investigative Journalist",
            "Truth Seeker",
            "An investigative journalist following a chain of missing persons that ends at \
             the facility's front door. Her source stopped answering two weeks ago.",
            80,
            85,
            &["investigation_skills", "interview_techniques", "pattern_recognition"],
            &["press_credentials", "encrypted_notebook", "recording_device"],
        ),
        profile(
            "scientist",
            "Dr. Michael Foster",
            "Cognitive Neuroscientist",
            "Ethical Researcher",
            "A cognitive neuroscientist invited to audit the project's ethics compliance. \
             The invitation was signed by a colleague who disappeared last spring.",
            75,
            80,
            &["medical_knowledge", "ethical_framework", "research_methodology"],
            &["medical_degree", "research_equipment", "ethical_guidelines"],
        ),
        profile(
            "child",
            "Sam Chen",
            "Child",
            "Innocent Victim",
            "A seven-year-old who wandered away from the family day tour to find mom's \
             office. The doors keep opening just ahead of him.",
            95,
            50,
            &["child_perspective", "digital_native", "emotional_resilience"],
            &["favorite_toy", "drawing_tablet", "photo_with_mom"],
        ),
        profile(
            "elderly",
            "Robert Kim",
            "Retired Engineer",
            "Legacy Subject",
            "A retired control systems engineer whose late wife volunteered for an early \
             trial. The facility wrote to say her cognitive profile was still on file.",
            80,
            75,
            &["engineering_expertise", "life_experience", "systematic_thinking"],
            &["engineering_tools", "wedding_photo", "nasa_badge"],
        ),
    ]
}

/// Register all ten character profiles.
pub fn register(registry: &mut ContentRegistry) {
    for character in roster() {
        registry.add_character(character);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn ten_distinct_profiles() {
        let roster = roster();
        let ids: BTreeSet<&str> = roster.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(roster.len(), 10);
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn starting_stats_are_already_clamped() {
        for character in roster() {
            assert!(
                (0..=100).contains(&character.starting_sanity),
                "{} sanity out of range",
                character.id
            );
            assert!(
                (0..=100).contains(&character.starting_awareness),
                "{} awareness out of range",
                character.id
            );
        }
    }

    #[test]
    fn everyone_arrives_with_three_belongings() {
        for character in roster() {
            assert_eq!(character.items.len(), 3, "{} item count", character.id);
            assert_eq!(character.abilities.len(), 3, "{} ability count", character.id);
        }
    }

    #[test]
    fn event_and_achievement_abilities_have_owners() {
        let roster = roster();
        let owns = |id: &str, ability: &str| {
            roster
                .iter()
                .find(|c| c.id.as_str() == id)
                .is_some_and(|c| c.abilities.iter().any(|a| a == ability))
        };
        assert!(owns("data-analyst", "data_analysis"));
        assert!(owns("security-guard", "protective_instinct"));
        assert!(owns("intern", "quick_learning"));
        assert!(owns("patient", "philosophical_insight"));
    }
}
