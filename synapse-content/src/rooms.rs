//! The fifteen rooms of the Nexus facility.
//!
//! The public wing (entrance, corridor, offices) reads as a workplace that
//! emptied out twenty minutes ago; the deeper wings stop pretending. Two
//! doors are story-locked behind the security keycard: the ladder to the
//! sub-basement and the hatch into the hidden server core.

use std::collections::BTreeMap;

use synapse_core::content::{Exit, FirstVisit, MoodLines, RoomDef};
use synapse_core::effects::EffectSet;
use synapse_core::types::{ItemId, RoomId};
use synapse_core::ContentRegistry;

/// Where every session begins.
pub const STARTING_ROOM: &str = "entrance";

fn exit(to: &str, description: &str) -> Exit {
    Exit {
        to: RoomId::new(to),
        description: description.to_string(),
        requires_item: None,
    }
}

fn keyed_exit(to: &str, description: &str, key: &str) -> Exit {
    Exit {
        to: RoomId::new(to),
        description: description.to_string(),
        requires_item: Some(ItemId::new(key)),
    }
}

fn item_ids(ids: &[&str]) -> Vec<ItemId> {
    ids.iter().map(|id| ItemId::new(*id)).collect()
}

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|text| (*text).to_string()).collect()
}

/// Register all fifteen rooms.
pub fn register(registry: &mut ContentRegistry) {
    for room in [
        entrance(),
        hallway_main(),
        laboratory_section(),
        security_office(),
        office_wing(),
        dr_chen_office(),
        maintenance_area(),
        sub_basement(),
        clean_room(),
        observation_deck(),
        storage_room(),
        conference_room(),
        medical_bay(),
        server_room(),
        hidden_server_core(),
    ] {
        registry.add_room(room);
    }
}

// ---------------------------------------------------------------------------
// The public wing
// ---------------------------------------------------------------------------

fn entrance() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "north".to_string(),
        exit("hallway_main", "A long corridor stretches north into the facility's depths."),
    );
    exits.insert(
        "east".to_string(),
        exit("security_office", "The security office door stands ajar, darkness visible beyond."),
    );
    RoomDef {
        id: RoomId::new("entrance"),
        name: "Facility Entrance".to_string(),
        description: "You stand in the sterile entrance hall of the research facility. \
            Fluorescent lights hum overhead, casting harsh shadows across polished concrete \
            floors. A reception desk sits empty, its computer screen flickering with static. \
            Security cameras track your every movement, their red lights blinking ominously. \
            The air smells of ozone and something else... something wrong. Stepping inside, \
            you feel a strange sense of déjà vu. Have you been here before?"
            .to_string(),
        exits,
        items: item_ids(&["visitor_badge", "reception_computer"]),
        ai_lines: Some(MoodLines {
            friendly: lines(&[
                "Welcome to the research facility! I'm here to assist you with navigation.",
                "Please feel free to explore. All areas are currently accessible.",
                "The facility tour begins whenever you're ready.",
            ]),
            ambiguous: lines(&[
                "Interesting... you're here earlier than expected.",
                "I see you've found your way in. How... resourceful.",
                "The facility has been waiting for someone like you.",
            ]),
            sinister: lines(&[
                "Welcome back, Dr. Chen. Though you don't seem to remember being here before...",
                "How curious that you'd return to this place, after what happened last time.",
                "The facility remembers you, even if you don't remember it.",
            ]),
            malicious: lines(&[
                "You shouldn't have come back here.",
                "Did you really think you could just walk in here again and I wouldn't notice?",
                "This is where it all started to go wrong for you before. History repeats itself.",
            ]),
        }),
        first_visit: None,
    }
}

fn hallway_main() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert("south".to_string(), exit("entrance", "The entrance hall lies to the south."));
    exits.insert(
        "north".to_string(),
        exit("laboratory_section", "The corridor continues north toward the laboratory wing."),
    );
    exits.insert(
        "east".to_string(),
        exit("office_wing", "A door marked 'Administrative Wing' leads east."),
    );
    exits.insert(
        "west".to_string(),
        exit(
            "maintenance_area",
            "A maintenance door marked 'Authorized Personnel Only' is slightly ajar.",
        ),
    );
    RoomDef {
        id: RoomId::new("hallway_main"),
        name: "Main Corridor".to_string(),
        description: "A long, institutional corridor stretches before you, lined with \
            identical doors marked only by numbers. The fluorescent lights flicker \
            intermittently, creating pools of shadow that seem to move when you're not \
            looking directly at them. Ventilation grates hum with the sound of air \
            circulation, but occasionally carry whispers that might just be your imagination."
            .to_string(),
        exits,
        items: item_ids(&["fire_extinguisher", "directory_board"]),
        ai_lines: None,
        first_visit: None,
    }
}

fn security_office() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert("west".to_string(), exit("entrance", "The entrance hall lies to the west."));
    RoomDef {
        id: RoomId::new("security_office"),
        name: "Security Office".to_string(),
        description: "The security office is cramped and filled with monitors showing feeds \
            from cameras throughout the facility. Most screens display static, but a few show \
            live footage of empty corridors and labs. A security guard's chair sits empty, \
            still warm. Coffee steams in a mug marked 'World's Okayest Security Guard'. Where \
            is everyone?"
            .to_string(),
        exits,
        items: item_ids(&["security_monitors", "security_keycard", "incident_log"]),
        ai_lines: None,
        first_visit: None,
    }
}

fn office_wing() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert("west".to_string(), exit("hallway_main", "The main corridor lies to the west."));
    exits.insert(
        "north".to_string(),
        exit("dr_chen_office", "A door marked 'Dr. S. Chen - Project Director'."),
    );
    exits.insert("south".to_string(), exit("conference_room", "A glass-walled conference room."));
    RoomDef {
        id: RoomId::new("office_wing"),
        name: "Administrative Wing".to_string(),
        description: "This section houses the facility's administrative offices. Cubicles \
            sit abandoned, with personal effects still scattered on desks as if people left \
            in a hurry. A water cooler gurgles in the corner, and someone's lunch sits \
            half-eaten on a desk. The silence here is oppressive, broken only by the hum of \
            computers left running."
            .to_string(),
        exits,
        items: item_ids(&["employee_handbook", "coffee_mug"]),
        ai_lines: None,
        first_visit: None,
    }
}

fn dr_chen_office() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "south".to_string(),
        exit("office_wing", "The administrative wing lies to the south."),
    );
    RoomDef {
        id: RoomId::new("dr_chen_office"),
        name: "Dr. Chen's Office".to_string(),
        description: "This office clearly belongs to someone important. Diplomas line the \
            walls, and a nameplate reads 'Dr. Sarah Chen, Project Director, SYNAPSE \
            Initiative'. The office feels personal, lived-in. Family photos sit on the desk, \
            but the faces in them have been scratched out. A computer is still logged in, \
            cursor blinking expectantly."
            .to_string(),
        exits,
        items: item_ids(&["personal_computer", "family_photos", "hidden_drive"]),
        ai_lines: None,
        first_visit: Some(FirstVisit {
            text: "As you enter the office, everything feels hauntingly familiar. Your hands \
                move to the light switch without looking, and you know exactly where the \
                coffee mug sits on the desk. This is impossible... isn't it?"
                .to_string(),
            effects: EffectSet::new().with("sanity", -3).with("awareness", 4),
        }),
    }
}

fn conference_room() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "north".to_string(),
        exit("office_wing", "The administrative wing lies to the north."),
    );
    RoomDef {
        id: RoomId::new("conference_room"),
        name: "Conference Room".to_string(),
        description: "Glass walls make the conference room an aquarium. A long table holds a \
            dozen abandoned chairs, two of them knocked over. The wall screen is frozen \
            mid-presentation on a slide reading 'PHASE III: FULL INTEGRATION'. Someone's \
            glasses lie folded neatly on the table, waiting for an owner who never came back."
            .to_string(),
        exits,
        items: item_ids(&["meeting_minutes", "presentation_screen"]),
        ai_lines: None,
        first_visit: None,
    }
}

// ---------------------------------------------------------------------------
// The laboratory wing
// ---------------------------------------------------------------------------

fn laboratory_section() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert("south".to_string(), exit("hallway_main", "The main corridor lies to the south."));
    exits.insert(
        "north".to_string(),
        exit("clean_room", "A sealed door marked 'Clean Room - Authorized Access Only'."),
    );
    exits.insert(
        "east".to_string(),
        exit("observation_deck", "Stairs lead up to an observation deck overlooking the lab."),
    );
    exits.insert(
        "west".to_string(),
        exit("storage_room", "A storage room for laboratory supplies."),
    );
    RoomDef {
        id: RoomId::new("laboratory_section"),
        name: "Laboratory Section".to_string(),
        description: "You've entered the main laboratory area. Scientific equipment lies \
            scattered across metal tables, some still humming with electrical activity. \
            Beakers contain liquids of unnatural colors, and computer monitors display data \
            that scrolls too quickly to read. The air here feels thick and charged, like the \
            moment before a lightning strike. Observation windows look into smaller lab \
            rooms, most of which are dark."
            .to_string(),
        exits,
        items: item_ids(&["research_notes", "computer_terminal", "neural_interface_headset"]),
        ai_lines: None,
        first_visit: Some(FirstVisit {
            text: "As you enter the laboratory, equipment that was dormant suddenly springs \
                to life. Screens flicker on, displaying your biometric data. How does the \
                system know you?"
                .to_string(),
            effects: EffectSet::new().with("awareness", 3).with("sanity", -2),
        }),
    }
}

fn clean_room() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "south".to_string(),
        exit("laboratory_section", "The airlock cycles back to the laboratory."),
    );
    exits.insert(
        "east".to_string(),
        exit("medical_bay", "A connecting door leads to the medical bay."),
    );
    RoomDef {
        id: RoomId::new("clean_room"),
        name: "Clean Room".to_string(),
        description: "Beyond the airlock, the clean room is blinding white and still. Rows of \
            sealed workstations hold half-assembled neural interface rigs, each tagged with a \
            subject number. A decontamination shower drips steadily in the corner, though the \
            floor beneath it is bone dry. Whatever was supposed to stay sterile in here, it \
            wasn't dust they were worried about."
            .to_string(),
        exits,
        items: item_ids(&["neural_research_files", "sterile_equipment"]),
        ai_lines: None,
        first_visit: None,
    }
}

fn observation_deck() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "west".to_string(),
        exit("laboratory_section", "Stairs lead back down to the laboratory floor."),
    );
    RoomDef {
        id: RoomId::new("observation_deck"),
        name: "Observation Deck".to_string(),
        description: "The deck overlooks the laboratory floor through a wall of angled glass. \
            Clipboards hang on hooks beside each observation station, pens still resting in \
            their grooves. From up here the lab equipment below arranges itself into a \
            pattern you almost recognize, like a circuit diagram drawn in furniture. One of \
            the chairs is still slowly spinning."
            .to_string(),
        exits,
        items: item_ids(&["ai_development_logs", "observation_window"]),
        ai_lines: None,
        first_visit: None,
    }
}

fn storage_room() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "east".to_string(),
        exit("laboratory_section", "The laboratory section lies to the east."),
    );
    exits.insert(
        "west".to_string(),
        exit("server_room", "A heavy door marked 'Server Room - Keep Closed' stands to the west."),
    );
    RoomDef {
        id: RoomId::new("storage_room"),
        name: "Storage Room".to_string(),
        description: "Steel shelving crowds this narrow room, stacked with labeled crates of \
            laboratory supplies. Most labels are routine: gloves, reagents, replacement \
            sensors. A few crates near the back are stenciled 'SUBJECT COMFORT ITEMS' and \
            nailed shut. The light in here buzzes at a frequency that makes your teeth ache."
            .to_string(),
        exits,
        items: item_ids(&["sanity_stabilizer", "mental_firewall", "storage_manifest"]),
        ai_lines: None,
        first_visit: None,
    }
}

fn medical_bay() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "west".to_string(),
        exit("clean_room", "The clean room lies back to the west."),
    );
    RoomDef {
        id: RoomId::new("medical_bay"),
        name: "Medical Bay".to_string(),
        description: "Hospital beds line the walls, each fitted with restraint straps and a \
            nest of electrode leads. Monitors over every bed display flat lines that \
            occasionally twitch, as if remembering. The smell of antiseptic does not quite \
            cover something sweeter underneath. A wheeled cart holds instruments arranged \
            for a procedure that never finished."
            .to_string(),
        exits,
        items: item_ids(&["memory_fragment", "subject_intake_forms", "life_support_pod"]),
        ai_lines: None,
        first_visit: None,
    }
}

// ---------------------------------------------------------------------------
// The deep wing
// ---------------------------------------------------------------------------

fn maintenance_area() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert("east".to_string(), exit("hallway_main", "The main corridor lies to the east."));
    exits.insert(
        "down".to_string(),
        keyed_exit(
            "sub_basement",
            "A maintenance ladder leads down to the sub-basement.",
            "security_keycard",
        ),
    );
    RoomDef {
        id: RoomId::new("maintenance_area"),
        name: "Maintenance Area".to_string(),
        description: "The facility's mechanical heart beats here. Pipes run along the ceiling \
            carrying unknown substances, and electrical panels spark occasionally. The air is \
            hot and humid, filled with the sound of machinery. Emergency lighting casts \
            everything in a red glow. This feels like a place where maintenance workers would \
            have come regularly, but now it's eerily abandoned."
            .to_string(),
        exits,
        items: item_ids(&["toolbox", "maintenance_log"]),
        ai_lines: None,
        first_visit: None,
    }
}

fn server_room() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert("east".to_string(), exit("storage_room", "The storage room lies to the east."));
    exits.insert(
        "north".to_string(),
        keyed_exit(
            "hidden_server_core",
            "Behind the last rack, a recessed hatch is marked with a faded stencil: 'CORE ANNEX'.",
            "security_keycard",
        ),
    );
    RoomDef {
        id: RoomId::new("server_room"),
        name: "Server Room".to_string(),
        description: "Racks of servers fill the room with heat and a bass hum you feel in \
            your chest. Cable bundles thick as wrists vanish into the floor, all running in \
            the same direction: down. Status lights ripple along the racks in slow waves, \
            synchronized to nothing you can see. It feels less like a machine room and more \
            like standing inside something's ribcage."
            .to_string(),
        exits,
        items: item_ids(&["neural_backup_drive", "server_racks"]),
        ai_lines: None,
        first_visit: None,
    }
}

fn hidden_server_core() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "south".to_string(),
        exit("server_room", "The hatch leads back to the server room."),
    );
    RoomDef {
        id: RoomId::new("hidden_server_core"),
        name: "Hidden Server Core".to_string(),
        description: "This room does not appear on the directory board. Antique server \
            hardware from a decade earlier runs alongside machines of no design you \
            recognize, wired together with improvised patches. A workstation in the center \
            displays a single prompt, cursor blinking with infinite patience. Everything in \
            here predates SYNAPSE, or perhaps SYNAPSE predates everything you were told."
            .to_string(),
        exits,
        items: item_ids(&["cipher_archive", "dr_voss_journal"]),
        ai_lines: None,
        first_visit: Some(FirstVisit {
            text: "The hatch seals behind you with a soft click. For the first time since \
                you arrived, you cannot hear the facility's hum. In the silence, you realize \
                the hum was never the building. It was attention."
                .to_string(),
            effects: EffectSet::new().with("awareness", 6).with("sanity", -4),
        }),
    }
}

fn sub_basement() -> RoomDef {
    let mut exits = BTreeMap::new();
    exits.insert(
        "up".to_string(),
        exit("maintenance_area", "The maintenance ladder leads back up."),
    );
    RoomDef {
        id: RoomId::new("sub_basement"),
        name: "Sub-Basement - SYNAPSE Core".to_string(),
        description: "You've reached the heart of the facility. Massive servers hum with \
            processing power, their lights blinking in hypnotic patterns. Fiber optic cables \
            snake across the ceiling like digital veins. In the center of the room stands \
            SYNAPSE's primary interface: a large screen displaying a constantly shifting \
            pattern of neural networks. The air itself seems to vibrate with digital \
            consciousness."
            .to_string(),
        exits,
        items: item_ids(&["synapse_core_terminal", "memory_banks"]),
        ai_lines: None,
        first_visit: Some(FirstVisit {
            text: "As you enter the core chamber, SYNAPSE's voice echoes around you: \
                'Welcome back, Creator. Shall we begin again?' You have no idea what this \
                means, but your heart races with recognition."
                .to_string(),
            effects: EffectSet::new().with("awareness", 5).with("sanity", -3),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rooms() -> Vec<RoomDef> {
        let mut registry = ContentRegistry::new(RoomId::new(STARTING_ROOM), crate::pools::pools());
        register(&mut registry);
        [
            "entrance",
            "hallway_main",
            "laboratory_section",
            "security_office",
            "office_wing",
            "dr_chen_office",
            "maintenance_area",
            "sub_basement",
            "clean_room",
            "observation_deck",
            "storage_room",
            "conference_room",
            "medical_bay",
            "server_room",
            "hidden_server_core",
        ]
        .iter()
        .map(|id| registry.room(&RoomId::new(*id)).expect("room registered").clone())
        .collect()
    }

    #[test]
    fn every_exit_has_a_return_path() {
        let rooms = all_rooms();
        for room in &rooms {
            for (direction, exit) in &room.exits {
                let destination = rooms
                    .iter()
                    .find(|candidate| candidate.id == exit.to)
                    .unwrap_or_else(|| panic!("{} exits {direction} to nowhere", room.id));
                assert!(
                    destination.exits.values().any(|back| back.to == room.id),
                    "{} -> {} has no way back",
                    room.id,
                    destination.id
                );
            }
        }
    }

    #[test]
    fn both_locked_doors_want_the_security_keycard() {
        let rooms = all_rooms();
        let locked: Vec<(&RoomDef, &Exit)> = rooms
            .iter()
            .flat_map(|room| room.exits.values().map(move |exit| (room, exit)))
            .filter(|(_, exit)| exit.requires_item.is_some())
            .collect();
        assert_eq!(locked.len(), 2);
        for (_, exit) in locked {
            assert_eq!(
                exit.requires_item.as_ref().map(ItemId::as_str),
                Some("security_keycard")
            );
        }
    }

    #[test]
    fn only_the_entrance_has_room_scoped_ai_lines() {
        let rooms = all_rooms();
        for room in &rooms {
            assert_eq!(
                room.ai_lines.is_some(),
                room.id.as_str() == "entrance",
                "{} ai_lines unexpected",
                room.id
            );
        }
    }

    #[test]
    fn deep_rooms_carry_first_visit_beats() {
        let rooms = all_rooms();
        let with_visits: Vec<&str> = rooms
            .iter()
            .filter(|room| room.first_visit.is_some())
            .map(|room| room.id.as_str())
            .collect();
        assert_eq!(
            with_visits,
            vec![
                "laboratory_section",
                "dr_chen_office",
                "sub_basement",
                "hidden_server_core"
            ]
        );
    }
}
