//! Lookup tables for the enumerated codes found in stream attributes.
//!
//! These never influence decoding; they only give names and values to the raw
//! codes the decoder stores.

/// A video frame rate, represented as a fraction.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameRate {
    const fn new(numerator: u32, denominator: u32) -> Self {
        FrameRate {
            numerator,
            denominator,
        }
    }

    /// Returns the fraction's value as an `f64`.
    pub fn fps(&self) -> f64 {
        (self.numerator as f64) / (self.denominator as f64)
    }

    /// Returns the fraction's value as an `f32`.
    pub fn fps_single(&self) -> f32 {
        (self.numerator as f32) / (self.denominator as f32)
    }
}

pub static STREAM_CODING_TYPE: &[(u8, &str)] = &[
    (0x01, "MPEG-1 video stream"),
    (0x02, "MPEG-2 video stream"),
    (0x1B, "MPEG-4 AVC video stream"),
    (0x20, "MPEG-4 MVC video stream"),
    (0xEA, "SMPTE VC-1 video stream"),
    (0x24, "HEVC video stream (including DV stream)"),
    (0x03, "MPEG-1 audio stream"),
    (0x04, "MPEG-2 audio stream"),
    (0x80, "LPCM audio stream (primary audio)"),
    (0x81, "Dolby Digital audio stream (primary audio)"),
    (0x82, "DTS audio stream (primary audio)"),
    (0x83, "Dolby Digital TrueHD audio stream (primary audio)"),
    (0x84, "Dolby Digital Plus audio stream (primary audio)"),
    (0x85, "DTS-HD High Resolution Audio audio stream (primary audio)"),
    (0x86, "DTS-HD Master Audio audio stream (primary audio)"),
    (0xA1, "Dolby Digital Plus audio stream (secondary audio)"),
    (0xA2, "DTS-HD audio stream (secondary audio)"),
    (0x90, "Presentation Graphics stream"),
    (0x91, "Interactive Graphics stream"),
    (0x92, "Text Subtitle stream"),
];

pub static VIDEO_FORMAT: &[(u8, &str)] = &[
    (1, "480i"),
    (2, "576i"),
    (3, "480p"),
    (4, "1080i"),
    (5, "720p"),
    (6, "1080p"),
    (7, "576p"),
    (8, "2160p"),
];

pub static FRAMERATE: &[(u8, FrameRate)] = &[
    (1, FrameRate::new(24_000, 1_001)),
    (2, FrameRate::new(24, 1)),
    (3, FrameRate::new(25, 1)),
    (4, FrameRate::new(30_000, 1_001)),
    (6, FrameRate::new(50, 1)),
    (7, FrameRate::new(60_000, 1_001)),
];

pub static DYNAMIC_RANGE_TYPE: &[(u8, &str)] = &[(0, "SDR"), (1, "HDR10"), (2, "Dolby Vision")];

pub static COLOR_SPACE: &[(u8, &str)] = &[
    (0, "Reserved"),
    (1, "ITU-R Recommendation BT.709"),
    (2, "ITU-R Recommendation BT.2020"),
];

pub static AUDIO_FORMAT: &[(u8, &str)] = &[
    (0x01, "mono"),
    (0x03, "stereo"),
    (0x06, "multichannel"),
    (0x0C, "stereo and multichannel"),
];

pub static SAMPLE_RATE: &[(u8, &str)] = &[
    (0x01, "48 KHz"),
    (0x04, "96 KHz"),
    (0x05, "192 KHz"),
    (0x0C, "48 & 192 KHz"),
    (0x0E, "48 & 96 KHz"),
];

/// Character code to WHATWG encoding label.
pub static CHARACTER_CODE: &[(u8, &str)] = &[
    (0x01, "utf-8"),
    (0x02, "utf-16be"),
    (0x03, "shift_jis"),
    (0x04, "euc-kr"),
    (0x05, "gb18030"),
    (0x06, "gb2312"),
    (0x07, "big5"),
];

fn lookup<T: Copy>(table: &[(u8, T)], code: u8) -> Option<T> {
    table.iter().find(|(c, _)| *c == code).map(|(_, v)| *v)
}

pub fn stream_coding_type_name(code: u8) -> Option<&'static str> {
    lookup(STREAM_CODING_TYPE, code)
}

pub fn video_format_name(code: u8) -> Option<&'static str> {
    lookup(VIDEO_FORMAT, code)
}

pub fn frame_rate(code: u8) -> Option<FrameRate> {
    lookup(FRAMERATE, code)
}

pub fn dynamic_range_type_name(code: u8) -> Option<&'static str> {
    lookup(DYNAMIC_RANGE_TYPE, code)
}

pub fn color_space_name(code: u8) -> Option<&'static str> {
    lookup(COLOR_SPACE, code)
}

pub fn audio_format_name(code: u8) -> Option<&'static str> {
    lookup(AUDIO_FORMAT, code)
}

pub fn sample_rate_name(code: u8) -> Option<&'static str> {
    lookup(SAMPLE_RATE, code)
}

pub fn character_code_label(code: u8) -> Option<&'static str> {
    lookup(CHARACTER_CODE, code)
}
