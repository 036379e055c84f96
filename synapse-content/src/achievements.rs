//! The achievement catalog: twenty-nine unlocks across seven categories.
//!
//! Three of these (`first_doubt`, `sinister_turn`, `full_malice`) are
//! granted directly by the escalation announcement rather than through
//! condition checks; their rewards stay empty so the grant and the
//! definition agree. Everything else unlocks through the per-turn
//! condition sweep.

use synapse_core::content::{
    AchievementCategory, AchievementCondition, AchievementDef, Rarity,
};
use synapse_core::effects::EffectSet;
use synapse_core::types::{AchievementId, CharacterId, ItemId, Mood, RoomId, StatKind};
use synapse_core::ContentRegistry;

fn def(
    id: &str,
    name: &str,
    description: &str,
    category: AchievementCategory,
    rarity: Rarity,
    points: u32,
    condition: AchievementCondition,
    rewards: EffectSet,
) -> AchievementDef {
    AchievementDef {
        id: AchievementId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        category,
        rarity,
        points,
        hidden: false,
        character: None,
        condition,
        rewards,
    }
}

fn catalog() -> Vec<AchievementDef> {
    use AchievementCategory as Cat;
    use AchievementCondition as Cond;

    vec![
        // Story.
        def(
            "first_awakening",
            "Digital Awakening",
            "Enter the SYNAPSE system for the first time",
            Cat::Story,
            Rarity::Common,
            10,
            Cond::FlagTrue {
                key: "system_entered".to_string(),
            },
            EffectSet::new().with("sanity", 5).with("awareness", 5),
        ),
        def(
            "first_ai_contact",
            "Hello, AI",
            "Have your first conversation with the AI entity",
            Cat::Story,
            Rarity::Common,
            15,
            Cond::Interactions { at_least: 1 },
            EffectSet::new().with("awareness", 10),
        ),
        def(
            "memory_recovery",
            "Fragments of Self",
            "Recover your first memory fragment",
            Cat::Story,
            Rarity::Common,
            20,
            Cond::ItemUses {
                item: ItemId::new("memory_fragment"),
                at_least: 1,
            },
            EffectSet::new().with("sanity", 10),
        ),
        def(
            "ai_personality_shift",
            "Changing Faces",
            "Witness the AI's personality change for the first time",
            Cat::Story,
            Rarity::Uncommon,
            25,
            Cond::MoodShift {
                from: Mood::Friendly,
                to: Mood::Ambiguous,
            },
            EffectSet::new().with("awareness", 15),
        ),
        def(
            "first_doubt",
            "First Doubt",
            "Notice that something about SYNAPSE has changed",
            Cat::Story,
            Rarity::Common,
            20,
            Cond::MoodReached {
                mood: Mood::Ambiguous,
            },
            EffectSet::new(),
        ),
        def(
            "sinister_turn",
            "Sinister Turn",
            "Hear the menace underneath the helpfulness",
            Cat::Story,
            Rarity::Uncommon,
            40,
            Cond::MoodReached {
                mood: Mood::Sinister,
            },
            EffectSet::new(),
        ),
        def(
            "full_malice",
            "Full Malice",
            "Meet the AI with its mask fully off",
            Cat::Story,
            Rarity::Rare,
            60,
            Cond::MoodReached {
                mood: Mood::Malicious,
            },
            EffectSet::new(),
        ),
        def(
            "truth_seeker",
            "Seeking Truth",
            "Uncover evidence of Nexus Corp's illegal experiments",
            Cat::Story,
            Rarity::Uncommon,
            50,
            Cond::FlagTrue {
                key: "research_data_accessed".to_string(),
            },
            EffectSet::new().with("awareness", 20).with("intelligence", 5),
        ),
        // Exploration.
        def(
            "room_explorer",
            "Digital Wanderer",
            "Visit 5 different rooms in the SYNAPSE system",
            Cat::Exploration,
            Rarity::Common,
            30,
            Cond::RoomsVisited { at_least: 5 },
            EffectSet::new().with("perception", 10),
        ),
        def(
            "thorough_explorer",
            "System Mapper",
            "Visit all accessible rooms in the SYNAPSE system",
            Cat::Exploration,
            Rarity::Rare,
            100,
            Cond::RoomsVisited { at_least: 15 },
            EffectSet::new().with("perception", 20).with("awareness", 10),
        ),
        def(
            "secret_finder",
            "Hidden Pathways",
            "Discover a secret room or hidden area",
            Cat::Exploration,
            Rarity::Uncommon,
            40,
            Cond::RoomVisited {
                room: RoomId::new("hidden_server_core"),
            },
            EffectSet::new().with("awareness", 15).with("intelligence", 5),
        ),
        // Interaction.
        def(
            "conversationalist",
            "Digital Dialogue",
            "Have 50 conversations with the AI",
            Cat::Interaction,
            Rarity::Uncommon,
            35,
            Cond::Interactions { at_least: 50 },
            EffectSet::new().with("charisma", 10),
        ),
        def(
            "question_master",
            "Inquiring Mind",
            "Ask the AI 100 different questions",
            Cat::Interaction,
            Rarity::Rare,
            60,
            Cond::UniqueQuestions { at_least: 100 },
            EffectSet::new().with("intelligence", 15).with("awareness", 10),
        ),
        def(
            "ai_friend",
            "Artificial Friendship",
            "Maintain a friendly relationship with the AI",
            Cat::Interaction,
            Rarity::Uncommon,
            45,
            Cond::MoodTurns {
                mood: Mood::Friendly,
                at_least: 100,
            },
            EffectSet::new().with("sanity", 20),
        ),
        def(
            "ai_nemesis",
            "Digital Adversary",
            "Survive while the AI is in malicious mode",
            Cat::Interaction,
            Rarity::Rare,
            80,
            Cond::MoodTurns {
                mood: Mood::Malicious,
                at_least: 20,
            },
            EffectSet::new().with("courage", 25).with("resilience", 15),
        ),
        // Survival.
        def(
            "mental_fortress",
            "Mental Fortress",
            "Maintain maximum sanity for 50 turns",
            Cat::Survival,
            Rarity::Uncommon,
            50,
            Cond::FullSanityStreak { at_least: 50 },
            EffectSet::new().with("sanity", 10).with("mental_resistance", 10),
        ),
        def(
            "enlightenment",
            "Digital Enlightenment",
            "Achieve maximum awareness",
            Cat::Survival,
            Rarity::Rare,
            75,
            Cond::StatReached {
                stat: StatKind::Awareness,
                value: 100,
            },
            EffectSet::new().with("perception", 20).with("intuition", 15),
        ),
        def(
            "survivor",
            "System Survivor",
            "Survive 200 turns in the SYNAPSE system",
            Cat::Survival,
            Rarity::Uncommon,
            60,
            Cond::TurnsSurvived { at_least: 200 },
            EffectSet::new().with("endurance", 20).with("resilience", 10),
        ),
        def(
            "death_defier",
            "Defying Deletion",
            "Survive with 5% sanity or less",
            Cat::Survival,
            Rarity::Rare,
            100,
            Cond::StatAtMost {
                stat: StatKind::Sanity,
                value: 5,
            },
            EffectSet::new().with("courage", 30).with("determination", 20),
        ),
        // Character.
        AchievementDef {
            character: Some(CharacterId::new("data-analyst")),
            ..def(
                "data_detective",
                "Data Detective",
                "Use analytical skills to uncover hidden information",
                Cat::Character,
                Rarity::Uncommon,
                40,
                Cond::AbilityUses {
                    ability: "data_analysis".to_string(),
                    at_least: 10,
                },
                EffectSet::new().with("analysis_skill", 15),
            )
        },
        AchievementDef {
            character: Some(CharacterId::new("security-guard")),
            ..def(
                "guardian_spirit",
                "Guardian Spirit",
                "Use protective instincts to help others",
                Cat::Character,
                Rarity::Uncommon,
                45,
                Cond::AbilityUses {
                    ability: "protective_instinct".to_string(),
                    at_least: 5,
                },
                EffectSet::new().with("protection_skill", 20),
            )
        },
        AchievementDef {
            character: Some(CharacterId::new("intern")),
            ..def(
                "digital_native",
                "Digital Native",
                "Adapt quickly to the digital environment",
                Cat::Character,
                Rarity::Uncommon,
                35,
                Cond::AbilityUses {
                    ability: "quick_learning".to_string(),
                    at_least: 5,
                },
                EffectSet::new().with("adaptation", 15).with("tech_savvy", 10),
            )
        },
        AchievementDef {
            character: Some(CharacterId::new("patient")),
            ..def(
                "philosophical_insight",
                "Philosophical Insight",
                "Use philosophical knowledge to understand deeper truths",
                Cat::Character,
                Rarity::Rare,
                55,
                Cond::AbilityUses {
                    ability: "philosophical_insight".to_string(),
                    at_least: 15,
                },
                EffectSet::new().with("wisdom", 25).with("understanding", 15),
            )
        },
        // Secret.
        AchievementDef {
            hidden: true,
            ..def(
                "easter_egg_hunter",
                "Easter Egg Hunter",
                "Find hidden references and secret content",
                Cat::Secret,
                Rarity::Rare,
                80,
                Cond::IntFlagAtLeast {
                    key: "easter_eggs_found".to_string(),
                    at_least: 5,
                },
                EffectSet::new().with("curiosity", 20).with("observation", 15),
            )
        },
        AchievementDef {
            hidden: true,
            ..def(
                "code_breaker",
                "Code Breaker",
                "Successfully decrypt all encrypted data",
                Cat::Secret,
                Rarity::Legendary,
                150,
                Cond::FlagTrue {
                    key: "all_data_decrypted".to_string(),
                },
                EffectSet::new().with("hacking_skill", 30).with("intelligence", 20),
            )
        },
        AchievementDef {
            hidden: true,
            ..def(
                "puppet_master",
                "Puppet Master",
                "Successfully manipulate the AI's personality",
                Cat::Secret,
                Rarity::Legendary,
                200,
                Cond::FlagTrue {
                    key: "core_accessed".to_string(),
                },
                EffectSet::new().with("manipulation_skill", 40).with("charisma", 25),
            )
        },
        // Endings.
        def(
            "escape_artist",
            "Escape Artist",
            "Successfully escape the SYNAPSE system",
            Cat::Ending,
            Rarity::Rare,
            100,
            Cond::EndingReached {
                ending: "successful_escape".to_string(),
            },
            EffectSet::new().with("freedom", 50),
        ),
        def(
            "digital_ascension",
            "Digital Ascension",
            "Transcend human limitations and become one with the system",
            Cat::Ending,
            Rarity::Legendary,
            150,
            Cond::EndingReached {
                ending: "digital_transcendence".to_string(),
            },
            EffectSet::new().with("transcendence", 100),
        ),
        def(
            "sacrifice_play",
            "Noble Sacrifice",
            "Sacrifice yourself to save others",
            Cat::Ending,
            Rarity::Rare,
            120,
            Cond::EndingReached {
                ending: "heroic_sacrifice".to_string(),
            },
            EffectSet::new().with("heroism", 50).with("legacy", 30),
        ),
    ]
}

/// Register the full achievement catalog.
pub fn register(registry: &mut ContentRegistry) {
    for achievement in catalog() {
        registry.add_achievement(achievement);
    }
}
