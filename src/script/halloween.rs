//! Built-in Halloween show: two pumpkins, seven dialogue scenes and three songs.

use crate::script::model::{ActorId, DialogueLine, LyricLine, Scene, Script, ScriptSlot, Song};

/// Left pumpkin.
pub const JACK: ActorId = ActorId(1);
/// Right pumpkin.
pub const GOURD: ActorId = ActorId(2);

/// The reference show script.
pub fn halloween_script() -> Script {
    Script {
        actors: vec![JACK, GOURD],
        scenes: scenes(),
        songs: songs(),
        order: vec![
            ScriptSlot::Dialogue(0),
            ScriptSlot::Dialogue(1),
            ScriptSlot::Song(0),
            ScriptSlot::Dialogue(2),
            ScriptSlot::Dialogue(3),
            ScriptSlot::Song(1),
            ScriptSlot::Dialogue(4),
            ScriptSlot::Dialogue(5),
            ScriptSlot::Song(2),
            ScriptSlot::Dialogue(6),
        ],
    }
}

fn say(speaker: ActorId, text: &str, duration: f64) -> DialogueLine {
    DialogueLine {
        speaker,
        text: text.to_owned(),
        duration,
    }
}

fn sing(text: &str, duration: f64, harmony: bool) -> LyricLine {
    LyricLine {
        text: text.to_owned(),
        duration,
        harmony,
    }
}

fn scene(name: &str, duration: f64, lines: Vec<DialogueLine>) -> Scene {
    Scene {
        name: name.to_owned(),
        duration,
        lines,
    }
}

fn song(title: &str, duration: f64, lyrics: Vec<LyricLine>) -> Song {
    Song {
        title: title.to_owned(),
        duration,
        lyrics,
    }
}

fn scenes() -> Vec<Scene> {
    vec![
        scene(
            "introduction",
            45.0,
            vec![
                say(JACK, "Well hello there, Jack! Ready for another spooky Halloween night?", 4.0),
                say(GOURD, "Oh my gourd, yes! I've been waiting all year for this moment!", 4.0),
                say(
                    JACK,
                    "The trick-or-treaters will be here soon. Should we give them a real scare?",
                    5.0,
                ),
                say(
                    GOURD,
                    "Absolutely! But first, how about we sing some frightfully fun songs?",
                    4.0,
                ),
                say(
                    JACK,
                    "Brilliant idea! Nothing says Halloween like a good old-fashioned pumpkin duet!",
                    5.0,
                ),
                say(GOURD, "Let's start with something spooky to set the mood...", 3.0),
            ],
        ),
        scene(
            "song1_intro",
            15.0,
            vec![
                say(JACK, "How about we sing about our favorite Halloween creatures?", 4.0),
                say(GOURD, "Perfect! I know just the song. Ready? One, two, three...", 4.0),
            ],
        ),
        scene(
            "intermission1",
            30.0,
            vec![
                say(GOURD, "That was wonderfully wicked! Did you hear that owl hooting?", 4.0),
                say(JACK, "I did! Even the bats are dancing to our tune tonight!", 4.0),
                say(GOURD, "Speaking of dancing, I saw some ghosts waltzing by earlier.", 4.0),
                say(JACK, "Really? Well, we better keep the music going then!", 3.0),
                say(GOURD, "Agreed! How about something about our spooky home?", 3.0),
            ],
        ),
        scene(
            "song2_intro",
            10.0,
            vec![
                say(JACK, "This one's about our haunted house! Ready?", 3.0),
                say(GOURD, "Let's make it extra eerie!", 2.0),
            ],
        ),
        scene(
            "intermission2",
            35.0,
            vec![
                say(JACK, "I love how our voices echo through the night!", 4.0),
                say(GOURD, "Me too! I think we're attracting quite an audience of spirits.", 4.0),
                say(JACK, "Look! There's a black cat watching us from the fence!", 4.0),
                say(
                    GOURD,
                    "And I see some glowing eyes in the bushes. How delightfully spooky!",
                    5.0,
                ),
                say(JACK, "Should we sing them a lullaby? Something soft and mysterious?", 4.0),
                say(GOURD, "What a ghoulishly good idea! Let's serenade the shadows.", 4.0),
            ],
        ),
        scene(
            "song3_intro",
            8.0,
            vec![
                say(JACK, "This one's for all the creatures of the night...", 3.0),
                say(GOURD, "A Halloween lullaby it is!", 2.0),
            ],
        ),
        scene(
            "finale",
            40.0,
            vec![
                say(GOURD, "What a magical Halloween evening this has been!", 4.0),
                say(JACK, "Indeed! Our songs have filled the night with spooky joy.", 4.0),
                say(GOURD, "I can hear the trick-or-treaters approaching down the street!", 4.0),
                say(JACK, "Perfect timing! Should we give them one final scare?", 4.0),
                say(GOURD, "Let's do it together! On the count of three... One... Two...", 4.0),
                say(JACK, "BOO! Happy Halloween, everyone!", 3.0),
                say(GOURD, "Hope you enjoyed our spooky serenade! Come back next year!", 4.0),
                say(JACK, "Until then, sweet screams and happy haunting!", 4.0),
            ],
        ),
    ]
}

fn songs() -> Vec<Song> {
    vec![
        song(
            "Creatures of the Night",
            120.0,
            vec![
                sing("In the shadows where the moonlight gleams", 4.0, false),
                sing("Dance the ghosts and ghouls of dreams", 4.0, false),
                sing("Witches fly on broomsticks high", 4.0, true),
                sing("Underneath the starlit sky", 4.0, true),
                sing("Bats are swooping all around", 4.0, false),
                sing("Making such a spooky sound", 4.0, false),
                sing("Werewolves howling at the moon", 4.0, true),
                sing("Halloween will be here soon", 4.0, true),
                sing("Creatures of the night unite", 4.0, true),
                sing("On this most enchanted night", 4.0, true),
                sing("Spiders weaving webs so fine", 4.0, false),
                sing("In the twisted old grapevine", 4.0, false),
                sing("Skeletons dance bone to bone", 4.0, true),
                sing("In the graveyard all alone", 4.0, true),
                sing("Come and join our spooky song", 4.0, true),
                sing("Halloween night is never wrong!", 4.0, true),
            ],
        ),
        song(
            "The Haunted House",
            100.0,
            vec![
                sing("There's a house upon the hill so high", 4.0, false),
                sing("Where the ravens come to cry", 4.0, false),
                sing("Creaking floors and squeaking doors", 4.0, true),
                sing("Ancient secrets it still stores", 4.0, true),
                sing("Windows glow with eerie light", 4.0, false),
                sing("Phantoms waltz throughout the night", 4.0, false),
                sing("Chains that rattle in the hall", 4.0, true),
                sing("Ghostly whispers through the wall", 4.0, true),
                sing("In our haunted house so dear", 4.0, true),
                sing("We gather spirits far and near", 4.0, true),
                sing("Cobwebs hanging from above", 4.0, false),
                sing("This spooky place is what we love", 4.0, false),
                sing("Come inside if you dare", 4.0, true),
                sing("But beware of what lurks there!", 4.0, true),
            ],
        ),
        song(
            "Halloween Lullaby",
            90.0,
            vec![
                sing("Sleep now little ghostly one", 5.0, false),
                sing("Your haunting day is done", 5.0, false),
                sing("Dream of pumpkins in the patch", 5.0, true),
                sing("And magic spells to catch", 5.0, true),
                sing("Moonbeams dance on spider silk", 5.0, false),
                sing("Soft as phantom milk", 5.0, false),
                sing("Stars are twinkling overhead", 5.0, true),
                sing("Time for sleepy head", 5.0, true),
                sing("Close your eyes my little sprite", 5.0, true),
                sing("Until tomorrow's fright", 5.0, true),
                sing("In your dreams you'll float and fly", 5.0, false),
                sing("Through the midnight sky", 5.0, false),
                sing("Rest now till the dawn breaks through", 5.0, true),
                sing("Sweet dreams will come to you", 5.0, true),
            ],
        ),
    ]
}
