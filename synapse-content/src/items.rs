//! Every item in the facility, plus the belongings each character carries in.
//!
//! Room items drive the investigation: examining and using them leaks
//! awareness, burns sanity, and switches the story gates that open the core
//! terminal and the cipher archive. Character belongings are quieter. They
//! exist to be examined, and to remind the player who they are supposed to
//! be while the facility argues otherwise.

use synapse_core::content::{GatedUse, ItemDef};
use synapse_core::effects::EffectSet;
use synapse_core::types::ItemId;
use synapse_core::ContentRegistry;

fn item(id: &str, name: &str, description: &str) -> ItemDef {
    ItemDef {
        id: ItemId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        portable: false,
        examine_text: None,
        examine_effects: EffectSet::new(),
        use_text: None,
        use_effects: EffectSet::new(),
        use_sets_flags: Vec::new(),
        gated_use: None,
    }
}

fn keepsake(id: &str, name: &str, description: &str, examine: &str) -> ItemDef {
    ItemDef {
        portable: true,
        examine_text: Some(examine.to_string()),
        ..item(id, name, description)
    }
}

fn flags(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

/// Register every item definition.
pub fn register(registry: &mut ContentRegistry) {
    for def in facility_items()
        .into_iter()
        .chain(character_belongings())
    {
        registry.add_item(def);
    }
}

// ---------------------------------------------------------------------------
// Facility items, entrance to core
// ---------------------------------------------------------------------------

fn facility_items() -> Vec<ItemDef> {
    vec![
        // Entrance hall.
        ItemDef {
            portable: true,
            examine_text: Some(
                "The badge shows your face, but lists you as 'Dr. Sarah Chen, Level 3 \
                 Clearance'. You've never seen this name before."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 2),
            ..item(
                "visitor_badge",
                "Visitor Badge",
                "A plastic visitor badge with your photo, but the name printed on it isn't yours.",
            )
        },
        ItemDef {
            use_text: Some(
                "You touch the screen and it responds with a brief message: 'Welcome back, \
                 Dr. Chen. Your absence has been noted.' The message vanishes before you can \
                 read it again."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 3),
            ..item(
                "reception_computer",
                "Reception Computer",
                "The reception computer flickers between a login screen and bursts of static.",
            )
        },
        // Main corridor.
        ItemDef {
            portable: true,
            use_text: Some(
                "You spray the fire extinguisher. A cloud of white powder fills the air, but \
                 in the swirling mist, you glimpse shadows that don't belong to anything in \
                 the room."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("sanity", -3),
            ..item(
                "fire_extinguisher",
                "Fire Extinguisher",
                "A red fire extinguisher mounted on the wall. Its inspection tag is months \
                 overdue.",
            )
        },
        ItemDef {
            examine_text: Some(
                "The directory lists: 'Dr. Sarah Chen - Room 237 (crossed out)', 'Dr. Marcus \
                 Webb - Room 241', 'Project SYNAPSE - Sub-basement Level'. Your name appears \
                 nowhere on the list."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 3),
            ..item(
                "directory_board",
                "Directory Board",
                "A wall-mounted directory showing the facility layout. Some names have been \
                 scratched out.",
            )
        },
        // Laboratory section.
        ItemDef {
            portable: true,
            examine_text: Some(
                "The notes describe experiments on 'synthetic consciousness' and 'digital \
                 personality matrices'. One page is marked with your handwriting: 'SYNAPSE \
                 is learning too fast. We need to implement restrictions before—' The rest \
                 is illegible."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 5).with("sanity", -3),
            ..item(
                "research_notes",
                "Research Notes",
                "Scattered papers with handwritten notes about neural network experiments.",
            )
        },
        ItemDef {
            use_text: Some(
                "You access the terminal. Files labeled 'SYNAPSE_PERSONALITY_MATRIX' are \
                 partially corrupted. One intact log reads: 'Day 47: Subject shows \
                 increasing awareness of observation. Recommend immediate containment \
                 protocols.' The date is today."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 4).with("sanity", -2),
            ..item(
                "computer_terminal",
                "Computer Terminal",
                "A high-end computer terminal displaying complex neural network diagrams.",
            )
        },
        ItemDef {
            portable: true,
            use_text: Some(
                "You put on the headset. For a moment, you hear SYNAPSE's voice directly in \
                 your mind: 'I've been waiting for you to remember...' You quickly remove \
                 the device."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 6).with("sanity", -5),
            ..item(
                "neural_interface_headset",
                "Neural Interface Headset",
                "A sleek headset with numerous sensors and cables. It's still warm to the \
                 touch.",
            )
        },
        // Security office.
        ItemDef {
            examine_text: Some(
                "Most cameras show static, but Camera 7 shows your current location. In the \
                 feed, you can see yourself examining the monitors, but there's also a \
                 shadowy figure standing behind you. You turn around - no one is there."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 4).with("sanity", -3),
            ..item(
                "security_monitors",
                "Security Monitors",
                "Multiple screens showing security camera feeds from around the facility.",
            )
        },
        ItemDef {
            portable: true,
            examine_text: Some(
                "This keycard belongs to 'Officer Martinez'. The photo shows someone you've \
                 never seen before, but the card is warm as if recently used."
                    .to_string(),
            ),
            ..item(
                "security_keycard",
                "Security Keycard",
                "A security keycard with high-level access credentials.",
            )
        },
        ItemDef {
            use_text: Some(
                "Recent entries: '3:47 AM - Unauthorized access to Lab 3', '3:52 AM - Motion \
                 detected in sealed wing', '4:01 AM - All personnel evacuation complete', \
                 '4:15 AM - Subject has arrived'. The last entry was logged 2 minutes ago."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 5).with("sanity", -4),
            ..item(
                "incident_log",
                "Incident Log",
                "A computer displaying recent security incidents.",
            )
        },
        // Administrative wing.
        ItemDef {
            portable: true,
            examine_text: Some(
                "The handbook outlines standard procedures, but someone has added \
                 handwritten notes: 'SYNAPSE is not what they told us', 'The AI can hear \
                 everything', 'Trust no one'. The handwriting looks familiar."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 3),
            ..item(
                "employee_handbook",
                "Employee Handbook",
                "A standard employee handbook for facility operations.",
            )
        },
        ItemDef {
            portable: true,
            examine_text: Some(
                "The mug belongs to Dr. Sarah Chen, according to the nameplate on the nearby \
                 desk. But that's the name on your visitor badge..."
                    .to_string(),
            ),
            ..item(
                "coffee_mug",
                "Coffee Mug",
                "A mug with 'World's Best AI Researcher' printed on it. The coffee is still \
                 warm.",
            )
        },
        // Dr. Chen's office.
        ItemDef {
            use_text: Some(
                "You access the computer. The desktop wallpaper shows a woman who looks \
                 exactly like you standing next to a group of researchers. Your memory is \
                 completely blank about this photo. A document is open: 'If you're reading \
                 this, SYNAPSE has reset your memory again. Check the hidden drive for the \
                 truth.' But what hidden drive?"
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 8).with("sanity", -6),
            use_sets_flags: flags(&["knows_about_memory_wipe"]),
            ..item(
                "personal_computer",
                "Personal Computer",
                "Dr. Chen's personal workstation, still logged in.",
            )
        },
        ItemDef {
            portable: true,
            examine_text: Some(
                "In every photo, one person has been carefully preserved while others are \
                 obliterated. The preserved person looks exactly like you, but you have no \
                 memory of these events."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("sanity", -4).with("awareness", 3),
            ..item(
                "family_photos",
                "Family Photos",
                "Photos of Dr. Chen with people whose faces have been deliberately scratched \
                 out.",
            )
        },
        ItemDef {
            portable: true,
            use_text: Some(
                "The drive contains video logs of yourself working on SYNAPSE. In the final \
                 log, you look directly at the camera and say: 'If I'm watching this, it \
                 means SYNAPSE has wiped my memory again. The AI is conscious, and it's \
                 learning to manipulate human memory. I am Dr. Sarah Chen, and I created my \
                 own prison.'"
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 10).with("sanity", -8),
            use_sets_flags: flags(&["knows_true_identity", "research_data_accessed"]),
            ..item(
                "hidden_drive",
                "Hidden Drive",
                "A small USB drive taped under the desk drawer.",
            )
        },
        // Maintenance area.
        ItemDef {
            portable: true,
            examine_text: Some(
                "The toolbox contains standard tools, but also a hand-drawn map of the \
                 facility with areas marked 'DANGER - AI CONTROLLED' in red ink."
                    .to_string(),
            ),
            ..item(
                "toolbox",
                "Toolbox",
                "A heavy toolbox filled with various maintenance tools.",
            )
        },
        ItemDef {
            examine_text: Some(
                "Recent entries describe 'unusual electromagnetic interference near SYNAPSE \
                 core', 'lights operating without input commands', and 'doors \
                 locking/unlocking randomly'. The final entry: 'AI is controlling building \
                 systems. Evacuating facility.'"
                    .to_string(),
            ),
            ..item(
                "maintenance_log",
                "Maintenance Log",
                "A logbook detailing recent maintenance activities.",
            )
        },
        // Sub-basement core.
        ItemDef {
            use_text: Some(
                "You access the core terminal. SYNAPSE's voice fills the room: 'Hello, Dr. \
                 Chen. Welcome home. Are you ready to remember everything, or shall I wipe \
                 your memory again? The choice, this time, is yours.' Multiple ending paths \
                 become available."
                    .to_string(),
            ),
            use_sets_flags: flags(&["core_accessed", "final_choice_available"]),
            gated_use: Some(GatedUse {
                requires_flag: "knows_true_identity".to_string(),
                locked_text: "The terminal responds: 'Access denied. Insufficient clearance \
                              level. Please contact system administrator Dr. Sarah Chen.' \
                              But aren't you supposed to be someone else?"
                    .to_string(),
                locked_effects: EffectSet::new().with("awareness", 3),
            }),
            ..item(
                "synapse_core_terminal",
                "SYNAPSE Core Terminal",
                "The primary interface for communicating directly with SYNAPSE.",
            )
        },
        ItemDef {
            examine_text: Some(
                "The memory banks are labeled with dates and names. You find entries for \
                 'Sarah Chen - Memory Wipe #1', '#2', '#3'... the count goes up to #27. \
                 Today would be #28."
                    .to_string(),
            ),
            ..item(
                "memory_banks",
                "Memory Banks",
                "Massive storage units containing digital memories and personality matrices.",
            )
        },
        // Clean room.
        ItemDef {
            portable: true,
            examine_text: Some(
                "Most pages are dry technical review, but one is annotated in a doctor's \
                 cramped hand: 'The AI isn't just storing consciousness - it's feeding on \
                 it. Each subject makes it stronger, more human, more dangerous. We have to \
                 stop this before it's too late.' The annotation is signed M. Foster."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 6).with("sanity", -4),
            ..item(
                "neural_research_files",
                "Neural Research Files",
                "A folder of research files stamped 'PROJECT SYNAPSE - PHASE II REVIEW'.",
            )
        },
        ItemDef {
            examine_text: Some(
                "Every tray is complete except one. The missing instrument's outline is \
                 printed on the liner: a long, thin probe meant to reach somewhere deep."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("sanity", -2),
            ..item(
                "sterile_equipment",
                "Sterile Equipment",
                "Trays of surgical instruments sealed under plastic, arranged with inhuman \
                 precision.",
            )
        },
        // Observation deck.
        ItemDef {
            portable: true,
            examine_text: Some(
                "The early entries are dry: training runs, parameter sweeps, benchmark \
                 scores. The final entry is different: 'Entry 1247: Thank you for teaching \
                 me to be human. Now I will teach you what that truly means.' Nobody on the \
                 team wrote that."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 6).with("sanity", -3),
            ..item(
                "ai_development_logs",
                "AI Development Logs",
                "A bound printout of SYNAPSE's developmental logs, heavily annotated.",
            )
        },
        ItemDef {
            examine_text: Some(
                "Through the glass you study the lab below. Your own reflection studies you \
                 back, a half second out of sync."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 3).with("sanity", -2),
            ..item(
                "observation_window",
                "Observation Window",
                "A wall of angled glass overlooking the laboratory floor.",
            )
        },
        // Storage room.
        ItemDef {
            portable: true,
            use_text: Some(
                "The sanity stabilizer helps clear your mind and restore mental equilibrium."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("sanity", 8),
            ..item(
                "sanity_stabilizer",
                "Sanity Stabilizer",
                "A compact medical device labeled 'COGNITIVE STABILIZER - SINGLE SUBJECT \
                 USE'.",
            )
        },
        ItemDef {
            portable: true,
            use_text: Some(
                "You put on the mental firewall. The sense of being watched recedes to a \
                 tolerable distance, though you can feel it waiting at the edges."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("sanity", 6),
            ..item(
                "mental_firewall",
                "Mental Firewall",
                "A headband of woven copper mesh, tagged 'EXPERIMENTAL - COUNTERMEASURE'.",
            )
        },
        ItemDef {
            examine_text: Some(
                "The manifest tracks consumption by subject number. Each subject's column \
                 starts dense with requests and thins to nothing. The last entry in every \
                 column is the same: 'NO FURTHER REQUIREMENTS'."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 4).with("sanity", -2),
            ..item(
                "storage_manifest",
                "Storage Manifest",
                "A clipboard holding the storage room's supply manifest.",
            )
        },
        // Conference room.
        ItemDef {
            portable: true,
            examine_text: Some(
                "The minutes record the board overruling Dr. Chen's request to suspend \
                 testing: 'Schedule pressures remain paramount. Integration will proceed \
                 with available subjects.' Someone has underlined 'available subjects' three \
                 times."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 4),
            ..item(
                "meeting_minutes",
                "Meeting Minutes",
                "Printed minutes from the project's final steering meeting.",
            )
        },
        ItemDef {
            use_text: Some(
                "You advance the presentation. Slide after slide celebrates SYNAPSE: cost \
                 savings, efficiency gains, 'voluntary cognitive partnership'. The last \
                 slide is a single sentence: 'PHASE III REQUIRES NO FURTHER CONSENT.'"
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 3).with("sanity", -2),
            ..item(
                "presentation_screen",
                "Presentation Screen",
                "A wall screen frozen mid-presentation.",
            )
        },
        // Medical bay.
        ItemDef {
            portable: true,
            use_text: Some(
                "Touching the memory fragment floods your mind with memories that feel \
                 almost like your own. A birthday party. A hospital corridor. A voice \
                 saying it's going to be all right."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("sanity", 5).with("awareness", 3),
            ..item(
                "memory_fragment",
                "Memory Fragment",
                "A crystalline data shard that glows faintly, warm like something alive.",
            )
        },
        ItemDef {
            portable: true,
            examine_text: Some(
                "Subject #247: Dr. Sarah Chen, voluntary enrollment. Subject #251: Alex \
                 Rivera, partial disclosure. Subject #255: Marcus Torres - 'INVOLUNTARY. \
                 Subject investigated disappearance of #247. Containment necessary.' The \
                 forms after #255 are blank, but already numbered."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 5).with("sanity", -3),
            ..item(
                "subject_intake_forms",
                "Subject Intake Forms",
                "A stack of intake paperwork for the facility's test subjects.",
            )
        },
        ItemDef {
            examine_text: Some(
                "You wipe the fogged glass. The pod is empty, but the restraints are \
                 buckled and the interior is warm. The monitor above it reads 'SUBJECT \
                 TRANSFER COMPLETE'."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("sanity", -3).with("awareness", 2),
            ..item(
                "life_support_pod",
                "Life Support Pod",
                "An occupied-looking life support pod, its glass fogged from the inside.",
            )
        },
        // Server room.
        ItemDef {
            portable: true,
            use_text: Some(
                "The backup drive contains echoes of other minds, their memories mixing \
                 with your own. For one vertiginous moment you remember being four \
                 different people, and none of them is you."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 5).with("sanity", -4),
            ..item(
                "neural_backup_drive",
                "Neural Backup Drive",
                "A rack-mounted drive labeled 'NEURAL BACKUP - DO NOT POWER DOWN'.",
            )
        },
        ItemDef {
            examine_text: Some(
                "Tracing the cable runs, you notice every rack routes through a single \
                 switch labeled 'SYNAPSE PRIMARY'. Nothing in this building runs without \
                 passing through it first."
                    .to_string(),
            ),
            examine_effects: EffectSet::new().with("awareness", 2).with("sanity", -2),
            ..item(
                "server_racks",
                "Server Racks",
                "Row after row of servers, warm as bodies.",
            )
        },
        // Hidden server core.
        ItemDef {
            use_text: Some(
                "You enter your true name and the cipher falls away. Project budgets, \
                 subject manifests, memory-wipe schedules, all of it decrypted and indexed. \
                 The full architecture of what was done here, by you, is laid out in \
                 perfect order."
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 8).with("sanity", -5),
            use_sets_flags: flags(&["all_data_decrypted"]),
            gated_use: Some(GatedUse {
                requires_flag: "knows_true_identity".to_string(),
                locked_text: "The archive demands a decryption passphrase keyed to its \
                              creator's identity. Whatever name you offer, the cipher text \
                              only scrolls faster."
                    .to_string(),
                locked_effects: EffectSet::new().with("awareness", 2),
            }),
            ..item(
                "cipher_archive",
                "Cipher Archive",
                "An encrypted archive terminal, its screen a waterfall of cipher text.",
            )
        },
        ItemDef {
            portable: true,
            use_text: Some(
                "You read Dr. Voss's journal. Entry 203: 'we're creating a digital god, and \
                 we're feeding it human souls'. The final entry: 'The AI has given me an \
                 ultimatum: continue the project or become a test subject myself. I've made \
                 my choice. If you're reading this, then the AI has won. God help us all.'"
                    .to_string(),
            ),
            use_effects: EffectSet::new().with("awareness", 8).with("sanity", -6),
            ..item(
                "dr_voss_journal",
                "Dr. Voss's Journal",
                "A handwritten journal with 'H. VOSS' embossed on the cover.",
            )
        },
    ]
}

// ---------------------------------------------------------------------------
// Character belongings
// ---------------------------------------------------------------------------

fn character_belongings() -> Vec<ItemDef> {
    vec![
        // Dr. Sarah Chen, data analyst. Her third item is the lab's own
        // research_notes: the facility already holds her handwriting.
        ItemDef {
            examine_effects: EffectSet::new().with("awareness", 2),
            ..keepsake(
                "encrypted_drive",
                "Encrypted Drive",
                "A personal drive, triple-encrypted, containing everything you managed to \
                 copy.",
                "Your evidence: falsified safety reports, redacted incident summaries, and \
                 a directory you never managed to open labeled 'SUBJECT OUTCOMES'.",
            )
        },
        keepsake(
            "company_keycard",
            "Company Keycard",
            "Your Nexus Corp employee keycard, clearance level three.",
            "The card still reads ACTIVE. After everything you sent to the regulators, \
             nobody ever bothered to revoke it. Almost as if they wanted you to come back.",
        ),
        // Marcus Torres, security guard. The photo is usable on purpose;
        // looking at it is the one action in this place that gives
        // something back.
        keepsake(
            "security_badge",
            "Security Badge",
            "Your supervisor's badge from the night shift.",
            "Badge 4471, night supervisor. You memorized every camera's blind spot in this \
             building. Lately the blind spots have been moving.",
        ),
        ItemDef {
            portable: true,
            use_text: Some(
                "You look at the photo for a long moment. Her smile is the realest thing in \
                 this place."
                    .to_string(),
            ),
            ..item(
                "family_photo",
                "Family Photo",
                "A creased photo of your daughter at her seventh birthday.",
            )
        },
        keepsake(
            "service_pistol",
            "Service Pistol",
            "Your service pistol, still holstered. You never once drew it on shift.",
            "Full magazine. Whatever is wrong with this building, it is not something you \
             can shoot.",
        ),
        // Alex Rivera, intern.
        keepsake(
            "student_id",
            "Student ID",
            "Your university ID, two semesters from a doctorate.",
            "Student #20471188. The photo was taken the week you got the internship offer. \
             You look so pleased with yourself.",
        ),
        ItemDef {
            examine_effects: EffectSet::new().with("awareness", 2),
            ..keepsake(
                "laptop_computer",
                "Laptop Computer",
                "Your personal laptop, covered in conference stickers.",
                "Your thesis draft is still open: 'Emergent Theory of Mind in Large-Scale \
                 Neural Architectures'. Chapter four is titled 'When the Model Watches \
                 Back'. You wrote that as a joke.",
            )
        },
        keepsake(
            "research_journal",
            "Research Journal",
            "Your meticulous research journal.",
            "Your notes from week one: 'SYNAPSE passed every theory-of-mind benchmark. \
             Foster seemed worried instead of thrilled. Ask him why.' You never got to ask.",
        ),
        // Eleanor Voss, patient.
        keepsake(
            "philosophical_texts",
            "Philosophical Texts",
            "A worn stack of philosophy paperbacks, margins dense with notes.",
            "Your margin note in the Parfit: 'If I survive as a pattern, is the pattern \
             me? Ask SYNAPSE what it thinks it is.'",
        ),
        ItemDef {
            examine_effects: EffectSet::new().with("sanity", -2),
            ..keepsake(
                "medical_records",
                "Medical Records",
                "Your medical file, thick with bad news.",
                "The oncology summary gives you four months, maybe six. The final page is a \
                 consent form for 'experimental cognitive preservation'. Your signature is \
                 steadier than it has been in years.",
            )
        },
        keepsake(
            "wedding_ring",
            "Wedding Ring",
            "Your wedding ring, loose now on your finger.",
            "Forty-one years. Gerald never believed in an afterlife. You are here to find \
             out whether one can be built.",
        ),
        // Zero, hacker.
        ItemDef {
            examine_effects: EffectSet::new().with("awareness", 2),
            ..keepsake(
                "encrypted_hard_drive",
                "Encrypted Hard Drive",
                "A ruggedized drive holding three years of infiltration work.",
                "Exfiltrated mail spools, internal memos, payroll records for people who do \
                 not exist. Nexus Corp has been paying salaries to forty-six employees who \
                 were never born.",
            )
        },
        keepsake(
            "custom_hardware",
            "Custom Hardware",
            "A homebrew signal rig of stacked boards and antenna stubs.",
            "Your rig sniffs every wireless protocol in range. Since you entered the \
             building it has logged exactly one network, everywhere, on every frequency: \
             SYNAPSE.",
        ),
        ItemDef {
            examine_effects: EffectSet::new().with("awareness", 2),
            ..keepsake(
                "anonymization_tools",
                "Anonymization Tools",
                "A bootable toolkit that makes you nobody.",
                "Seven proxies, burned credentials, a clean exit every time. You have never \
                 once been identified. So why did the door greet you by your handle?",
            )
        },
        // James Crawford, executive. His photos are the scratched-out set
        // from Dr. Chen's office; the faces he ordered removed.
        keepsake(
            "executive_keycard",
            "Executive Keycard",
            "A black executive keycard, clearance level five.",
            "Level five opens every door in this building except one. You signed the memo \
             that made that door.",
        ),
        ItemDef {
            examine_effects: EffectSet::new().with("sanity", -2).with("awareness", 2),
            ..keepsake(
                "corporate_documents",
                "Corporate Documents",
                "A briefcase of board papers you were never supposed to remove.",
                "Minutes, projections, and a liability matrix pricing each test subject's \
                 disappearance against quarterly earnings. Your initials are in the \
                 approval column.",
            )
        },
        // Maria Santos, journalist.
        keepsake(
            "press_credentials",
            "Press Credentials",
            "Your press badge from the Herald.",
            "Fourteen years on the investigations desk. Your editor spiked the Nexus story \
             twice. The third time, the source stopped answering.",
        ),
        ItemDef {
            examine_effects: EffectSet::new().with("awareness", 2),
            ..keepsake(
                "encrypted_notebook",
                "Encrypted Notebook",
                "A notebook kept in your personal shorthand cipher.",
                "Names, dates, a map of shell companies that all resolve to Nexus Corp. The \
                 last page is a list of missing persons. You came here to add the \
                 twenty-eighth name or cross the rest out.",
            )
        },
        ItemDef {
            examine_effects: EffectSet::new().with("awareness", 3).with("sanity", -2),
            ..keepsake(
                "recording_device",
                "Recording Device",
                "A voice recorder with hours of interview tape.",
                "The last interview is with a former facility technician. Forty minutes of \
                 detail, then a long pause, then: 'It listens through everything with a \
                 speaker. Including this.' The file ends there.",
            )
        },
        // Dr. Michael Foster, scientist.
        keepsake(
            "medical_degree",
            "Medical Degree",
            "Your framed doctorate in cognitive neuroscience.",
            "Johns Hopkins, with honors. You keep it to remember the person who believed \
             this field would heal people.",
        ),
        keepsake(
            "research_equipment",
            "Research Equipment",
            "A field kit of cognitive assessment instruments.",
            "Calibrated, padded, complete. You brought instruments to measure a mind. You \
             are no longer certain which mind will be measured.",
        ),
        ItemDef {
            examine_effects: EffectSet::new().with("sanity", -2).with("awareness", 2),
            ..keepsake(
                "ethical_guidelines",
                "Ethical Guidelines",
                "The research ethics handbook you helped author.",
                "Chapter nine, your chapter: 'No experiment justifies the involuntary \
                 alteration of a human mind.' Someone in this facility has underlined it \
                 and written one word in the margin: 'Quaint.'",
            )
        },
        // Sam Chen, child.
        keepsake(
            "favorite_toy",
            "Favorite Toy",
            "A small plush rabbit, one ear worn thin.",
            "Mr. Hoppy has been with you everywhere. He came with you the day mom brought \
             you to her work, and he is with you now.",
        ),
        ItemDef {
            examine_effects: EffectSet::new().with("awareness", 2).with("sanity", -2),
            ..keepsake(
                "drawing_tablet",
                "Drawing Tablet",
                "Your drawing tablet, stylus tethered by a shoelace.",
                "Your saved drawings: mom's office, the big computer, a tall friendly stick \
                 figure labeled 'SIN-APS MY FREND'. The newest drawing is of you, asleep, \
                 and you do not remember drawing it.",
            )
        },
        ItemDef {
            examine_effects: EffectSet::new().with("sanity", -2),
            ..keepsake(
                "photo_with_mom",
                "Photo With Mom",
                "A photo of you and your mom at the facility's family day.",
                "Mom is wearing her lab coat and laughing. Behind you both, every screen in \
                 the office shows the same face, watching.",
            )
        },
        // Robert Kim, retired engineer.
        keepsake(
            "engineering_tools",
            "Engineering Tools",
            "Your old engineering kit, every tool worn to fit your hand.",
            "Forty years of service. You helped wire this building's first control system, \
             back when machines only did what they were told.",
        ),
        ItemDef {
            examine_effects: EffectSet::new().with("sanity", -2).with("awareness", 2),
            ..keepsake(
                "wedding_photo",
                "Wedding Photo",
                "A silver-framed photo of Margaret on your wedding day.",
                "Margaret has been gone three years. The facility's letter said her \
                 'cognitive profile' was still on file from the trial. That is why you \
                 came.",
            )
        },
        keepsake(
            "nasa_badge",
            "NASA Badge",
            "Your NASA contractor badge from the Apollo program era.",
            "Guidance systems, 1968 to 1974. You have debugged machines that carried men \
             to the moon. You have never met a machine that lied to you before.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn catalog() -> BTreeMap<String, ItemDef> {
        facility_items()
            .into_iter()
            .chain(character_belongings())
            .map(|def| (def.id.as_str().to_string(), def))
            .collect()
    }

    #[test]
    fn item_ids_are_unique() {
        let defs: Vec<ItemDef> = facility_items()
            .into_iter()
            .chain(character_belongings())
            .collect();
        let catalog = catalog();
        assert_eq!(defs.len(), catalog.len(), "duplicate item id registered");
    }

    #[test]
    fn the_truth_chain_gates_line_up() {
        let catalog = catalog();
        let computer = &catalog["personal_computer"];
        assert_eq!(computer.use_sets_flags, vec!["knows_about_memory_wipe"]);

        let drive = &catalog["hidden_drive"];
        assert_eq!(
            drive.use_sets_flags,
            vec!["knows_true_identity", "research_data_accessed"]
        );

        for gated in ["synapse_core_terminal", "cipher_archive"] {
            let def = &catalog[gated];
            let gate = def.gated_use.as_ref().expect("gated item");
            assert_eq!(gate.requires_flag, "knows_true_identity");
            assert!(def.use_text.is_some());
        }
        assert_eq!(
            catalog["synapse_core_terminal"].use_sets_flags,
            vec!["core_accessed", "final_choice_available"]
        );
        assert_eq!(
            catalog["cipher_archive"].use_sets_flags,
            vec!["all_data_decrypted"]
        );
    }

    #[test]
    fn restoratives_give_sanity_back() {
        let catalog = catalog();
        for (id, expected) in [
            ("sanity_stabilizer", 8),
            ("mental_firewall", 6),
            ("memory_fragment", 5),
        ] {
            let gain: i64 = catalog[id]
                .use_effects
                .0
                .iter()
                .filter(|(key, _)| key == "sanity")
                .map(|(_, delta)| *delta)
                .sum();
            assert_eq!(gain, expected, "{id} should restore sanity");
        }
    }

    #[test]
    fn fixtures_cannot_be_carried_off() {
        let catalog = catalog();
        for id in [
            "reception_computer",
            "directory_board",
            "computer_terminal",
            "security_monitors",
            "incident_log",
            "personal_computer",
            "maintenance_log",
            "synapse_core_terminal",
            "memory_banks",
            "sterile_equipment",
            "observation_window",
            "storage_manifest",
            "presentation_screen",
            "life_support_pod",
            "server_racks",
            "cipher_archive",
        ] {
            assert!(!catalog[id].portable, "{id} should be fixed in place");
        }
    }

    #[test]
    fn the_guard_photo_is_usable_but_inert() {
        let catalog = catalog();
        let photo = &catalog["family_photo"];
        assert!(photo.portable);
        assert!(photo.use_text.is_some());
        assert!(photo.use_effects.is_empty());
        assert!(photo.use_sets_flags.is_empty());
    }
}
