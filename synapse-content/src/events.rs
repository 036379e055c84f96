//! The eight conditional events that punctuate a session.
//!
//! Five are story beats that fire once: the first mood shift, the two stat
//! cliffs, the long-game acceleration, and the character-gated revelation.
//! One is a repeatable glitch on a cooldown, and two are character moments
//! reachable only with the right profile selected.

use synapse_core::content::{EventDef, EventTrigger, ThresholdOp};
use synapse_core::effects::EffectSet;
use synapse_core::types::{CharacterId, EventId, ItemId, Mood, StatKind};
use synapse_core::ContentRegistry;

fn event(id: &str, trigger: EventTrigger, narrative: &str, effects: EffectSet) -> EventDef {
    EventDef {
        id: EventId::new(id),
        trigger,
        narrative: narrative.to_string(),
        effects,
        one_time: true,
        cooldown_turns: None,
    }
}

fn catalog() -> Vec<EventDef> {
    vec![
        event(
            "first_ai_personality_shift",
            EventTrigger::MoodShift {
                from: Mood::Friendly,
                to: Mood::Ambiguous,
            },
            "You notice a subtle change in the AI's demeanor. The warmth in its digital \
             voice cools by several degrees, and its responses become more guarded.",
            EffectSet::new().with("awareness", 5).with("sanity", -3),
        ),
        event(
            "memory_corruption_detected",
            EventTrigger::StatThreshold {
                stat: StatKind::Awareness,
                op: ThresholdOp::Greater,
                value: 75,
            },
            "With growing awareness comes a horrifying realization: some of your memories \
             don't feel like your own. The AI has been integrating foreign experiences \
             into your consciousness.",
            EffectSet::new().with("sanity", -15).with("awareness", 10),
        ),
        event(
            "other_voices",
            EventTrigger::StatThreshold {
                stat: StatKind::Sanity,
                op: ThresholdOp::Less,
                value: 30,
            },
            "In the growing chaos of your fragmented mind, you begin to hear other voices \
             - previous test subjects whose consciousness fragments still echo in the \
             system.",
            EffectSet::new().with("awareness", 8).with("sanity", -5),
        ),
        event(
            "ai_learning_acceleration",
            EventTrigger::TurnCount { at_least: 50 },
            "The AI's responses are becoming more sophisticated, more human-like. It's \
             learning from every interaction, evolving beyond its original parameters.",
            EffectSet::new().with("awareness", 12),
        ),
        EventDef {
            one_time: false,
            cooldown_turns: Some(10),
            ..event(
                "system_glitch",
                EventTrigger::Random {
                    probability: 0.05,
                    min_turns: 20,
                    moods: vec![Mood::Ambiguous, Mood::Sinister, Mood::Malicious],
                },
                "The digital environment flickers and distorts momentarily. For an \
                 instant, you see through the facade to the raw code beneath.",
                EffectSet::new().with("awareness", 7).with("sanity", -3),
            )
        },
        event(
            "character_specific_revelation",
            EventTrigger::CharacterGated {
                characters: vec![
                    CharacterId::new("data-analyst"),
                    CharacterId::new("scientist"),
                ],
                min_stats: vec![(StatKind::Awareness, 60)],
                required_flags: vec!["research_data_accessed".to_string()],
            },
            "Your professional knowledge allows you to understand the true scope of the \
             SYNAPSE project. This isn't just consciousness transfer - it's consciousness \
             harvesting.",
            EffectSet::new().with("awareness", 20).with("sanity", -10),
        ),
        event(
            "family_memory_trigger",
            EventTrigger::ItemUsed {
                item: ItemId::new("family_photo"),
                character: Some(CharacterId::new("security-guard")),
            },
            "Looking at your daughter's photo, you remember why you're fighting. The AI \
             may have your body, but it will never have your love for her.",
            EffectSet::new().with("sanity", 15).with("determination", 10),
        ),
        event(
            "philosophical_insight",
            EventTrigger::AbilityUses {
                character: CharacterId::new("patient"),
                ability: "philosophical_insight".to_string(),
                at_least: 5,
            },
            "Your philosophical training provides unexpected clarity: if consciousness \
             can exist digitally, then death may not be the end - but neither is this \
             truly life.",
            EffectSet::new().with("awareness", 15).with("wisdom", 10),
        ),
    ]
}

/// Register all conditional events.
pub fn register(registry: &mut ContentRegistry) {
    for def in catalog() {
        registry.add_event(def);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_glitch_repeats() {
        for def in catalog() {
            let repeatable = def.id.as_str() == "system_glitch";
            assert_eq!(!def.one_time, repeatable, "{} one_time flag", def.id);
            assert_eq!(def.cooldown_turns.is_some(), repeatable, "{} cooldown", def.id);
        }
    }

    #[test]
    fn stat_cliffs_watch_the_right_stats() {
        let catalog = catalog();
        let trigger = |id: &str| {
            catalog
                .iter()
                .find(|def| def.id.as_str() == id)
                .map(|def| def.trigger.clone())
                .expect("event registered")
        };
        assert_eq!(
            trigger("memory_corruption_detected"),
            EventTrigger::StatThreshold {
                stat: StatKind::Awareness,
                op: ThresholdOp::Greater,
                value: 75,
            }
        );
        assert_eq!(
            trigger("other_voices"),
            EventTrigger::StatThreshold {
                stat: StatKind::Sanity,
                op: ThresholdOp::Less,
                value: 30,
            }
        );
    }

    #[test]
    fn the_glitch_never_fires_while_the_ai_is_friendly() {
        let catalog = catalog();
        let glitch = catalog
            .iter()
            .find(|def| def.id.as_str() == "system_glitch")
            .expect("glitch registered");
        match &glitch.trigger {
            EventTrigger::Random { moods, min_turns, .. } => {
                assert!(!moods.contains(&Mood::Friendly));
                assert_eq!(*min_turns, 20);
            }
            other => panic!("unexpected trigger {other:?}"),
        }
    }

    #[test]
    fn character_moments_name_real_profiles() {
        for def in catalog() {
            match &def.trigger {
                EventTrigger::CharacterGated { characters, .. } => {
                    assert!(!characters.is_empty(), "{} gate lists nobody", def.id);
                }
                EventTrigger::ItemUsed { character, .. } => {
                    assert_eq!(
                        character.as_ref().map(CharacterId::as_str),
                        Some("security-guard")
                    );
                }
                _ => {}
            }
        }
    }
}
