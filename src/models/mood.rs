use std::fmt;

/// Coarse emotion category driving the playlist theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Surprise,
    Fear,
    Neutral,
}

/// Genre tags and descriptive keywords used to query the catalog for a mood.
#[derive(Debug, PartialEq, Eq)]
pub struct MoodSeeds {
    pub genres: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

static HAPPY: MoodSeeds = MoodSeeds {
    genres: &["pop", "dance", "feel-good", "funk", "indie pop"],
    keywords: &[
        "upbeat", "joy", "cheerful", "energizing", "positive", "carefree", "celebratory", "optimistic",
    ],
};

static SAD: MoodSeeds = MoodSeeds {
    genres: &["sad", "acoustic", "melancholic", "blues", "slow ballads"],
    keywords: &[
        "heartbreak", "grief", "loneliness", "melancholy", "reflection", "nostalgia", "emotional", "soulful",
    ],
};

static ANGRY: MoodSeeds = MoodSeeds {
    genres: &["metal", "rock", "punk", "hardcore", "industrial", "rap", "grunge"],
    keywords: &["rage", "powerful", "intense", "rebellious", "aggressive"],
};

static SURPRISE: MoodSeeds = MoodSeeds {
    genres: &["pop", "electronic", "dance", "experimental", "future bass", "trap"],
    keywords: &[
        "exciting", "unexpected", "energetic", "shocking", "vibrant", "playful", "adventurous", "thrilling",
    ],
};

static FEAR: MoodSeeds = MoodSeeds {
    genres: &[
        "dark-ambient", "atmospheric", "industrial", "synthwave", "gothic", "psychedelic", "horror soundtrack",
    ],
    keywords: &[
        "atmospheric", "mysterious", "intense", "uneasy", "unsettling", "tense", "suspense", "horror", "dark",
    ],
};

static NEUTRAL: MoodSeeds = MoodSeeds {
    genres: &["indie", "alternative", "chill", "lo-fi", "soft rock", "acoustic"],
    keywords: &[
        "chill", "relaxing", "balanced", "calm", "grounded", "focused", "instrumental", "piano",
    ],
};

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Surprise,
        Mood::Fear,
        Mood::Neutral,
    ];

    /// Case-insensitive parse. Anything unrecognized, including the empty
    /// string and classifier sentinels, resolves to `Neutral`.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "happy" => Mood::Happy,
            "sad" => Mood::Sad,
            "angry" => Mood::Angry,
            "surprise" => Mood::Surprise,
            "fear" => Mood::Fear,
            _ => Mood::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Surprise => "surprise",
            Mood::Fear => "fear",
            Mood::Neutral => "neutral",
        }
    }

    pub fn seeds(&self) -> &'static MoodSeeds {
        match self {
            Mood::Happy => &HAPPY,
            Mood::Sad => &SAD,
            Mood::Angry => &ANGRY,
            Mood::Surprise => &SURPRISE,
            Mood::Fear => &FEAR,
            Mood::Neutral => &NEUTRAL,
        }
    }

    /// Target valence (musical positivity) passed to the recommendation endpoint.
    pub fn target_valence(&self) -> f32 {
        match self {
            Mood::Happy => 0.8,
            Mood::Sad => 0.2,
            _ => 0.5,
        }
    }

    /// Curated Spotify playlist used when search turns up nothing.
    pub fn fallback_playlist_id(&self) -> &'static str {
        match self {
            Mood::Happy => "37i9dQZF1DXdPec7aLTmlC",
            Mood::Sad => "37i9dQZF1DX7qK8ma5wgG1",
            Mood::Angry => "37i9dQZF1EIhuf6Y9zbnVa",
            Mood::Surprise => "37i9dQZF1EIhq2vQuxpBQS",
            Mood::Fear => "37i9dQZF1EIhtBm8L7FW0x",
            Mood::Neutral => "37i9dQZF1DX3rxVfibe1L0",
        }
    }

    pub fn fallback_playlist_url(&self) -> String {
        format!("https://open.spotify.com/playlist/{}", self.fallback_playlist_id())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MoodSeeds {
    pub fn lookup(mood: &str) -> &'static MoodSeeds {
        Mood::from_label(mood).seeds()
    }
}
