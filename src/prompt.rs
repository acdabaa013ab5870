//! Static two-level lookup from analysis style to instruction text.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisStyle {
    Professional,
    Humorous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Substyle {
    Technical,
    Narrative,
    Aesthetic,
    Cinematic,
    Sarcastic,
    Meme,
    Parody,
    Comedic,
}

impl Substyle {
    /// The style this substyle belongs to; a mismatched pair is rejected.
    pub fn style(self) -> AnalysisStyle {
        match self {
            Substyle::Technical | Substyle::Narrative | Substyle::Aesthetic | Substyle::Cinematic => {
                AnalysisStyle::Professional
            }
            Substyle::Sarcastic | Substyle::Meme | Substyle::Parody | Substyle::Comedic => {
                AnalysisStyle::Humorous
            }
        }
    }
}

impl fmt::Display for AnalysisStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStyle::Professional => write!(f, "professional"),
            AnalysisStyle::Humorous => write!(f, "humorous"),
        }
    }
}

impl fmt::Display for Substyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Substyle::Technical => "technical",
            Substyle::Narrative => "narrative",
            Substyle::Aesthetic => "aesthetic",
            Substyle::Cinematic => "cinematic",
            Substyle::Sarcastic => "sarcastic",
            Substyle::Meme => "meme",
            Substyle::Parody => "parody",
            Substyle::Comedic => "comedic",
        };
        write!(f, "{name}")
    }
}

impl FromStr for AnalysisStyle {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "professional" => Ok(AnalysisStyle::Professional),
            "humorous" => Ok(AnalysisStyle::Humorous),
            _ => Err(Error::UnknownStyle(value.to_owned())),
        }
    }
}

impl FromStr for Substyle {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "technical" => Ok(Substyle::Technical),
            "narrative" => Ok(Substyle::Narrative),
            "aesthetic" => Ok(Substyle::Aesthetic),
            "cinematic" => Ok(Substyle::Cinematic),
            "sarcastic" => Ok(Substyle::Sarcastic),
            "meme" => Ok(Substyle::Meme),
            "parody" => Ok(Substyle::Parody),
            "comedic" => Ok(Substyle::Comedic),
            _ => Err(Error::UnknownSubstyle(value.to_owned())),
        }
    }
}

const PROFESSIONAL: &str = "Provide a professional, detailed analysis of this content, describing \
     visual elements, composition, movement, colors, and possible contexts or narratives.";

const HUMOROUS: &str = "Analyze this content in a humorous way, poking fun at what is happening, \
     inventing funny stories, or making sarcastic remarks about it.";

const TECHNICAL: &str = "Provide a detailed technical analysis of this content, focusing on \
     composition, lighting, framing, technical quality, and visual elements.";

const NARRATIVE: &str = "Analyze this content from a narrative perspective, describing the story, \
     characters, context, and how the visual narrative develops.";

const AESTHETIC: &str = "Provide an aesthetic analysis of this content, exploring visual elements \
     such as colors, textures, patterns, and the artistic beauty of the composition.";

const CINEMATIC: &str = "Perform a cinematographic analysis of this content, discussing elements \
     such as direction, photography, editing, and the cinematic techniques used.";

const SARCASTIC: &str = "Analyze this content sarcastically, making ironic and good-humored \
     remarks about what it shows.";

const MEME: &str = "Turn this content into a meme, writing funny captions and relating it to \
     popular internet memes.";

const PARODY: &str = "Create a humorous parody of this content, inventing an exaggerated, funny \
     story based on what it shows.";

const COMEDIC: &str = "Give a comedic analysis of this content, adding humor and jokes related to \
     what is happening.";

/// Looks up the instruction for a style and optional substyle. Without a
/// substyle the style's general instruction is returned; with one, the pair
/// must match or the lookup fails.
pub fn select(style: AnalysisStyle, substyle: Option<Substyle>) -> Result<&'static str> {
    let Some(substyle) = substyle else {
        return Ok(match style {
            AnalysisStyle::Professional => PROFESSIONAL,
            AnalysisStyle::Humorous => HUMOROUS,
        });
    };

    if substyle.style() != style {
        return Err(Error::UnknownSubstyle(format!(
            "{substyle} is not a {style} substyle"
        )));
    }

    Ok(match substyle {
        Substyle::Technical => TECHNICAL,
        Substyle::Narrative => NARRATIVE,
        Substyle::Aesthetic => AESTHETIC,
        Substyle::Cinematic => CINEMATIC,
        Substyle::Sarcastic => SARCASTIC,
        Substyle::Meme => MEME,
        Substyle::Parody => PARODY,
        Substyle::Comedic => COMEDIC,
    })
}

/// Notes how many of the video's frames were actually attached, when fewer
/// than the total.
pub fn with_frame_note(instruction: &str, sent: usize, total: i64) -> String {
    if (sent as i64) < total {
        format!("{instruction} (analyzing {sent} of {total} frames)")
    } else {
        instruction.to_owned()
    }
}
