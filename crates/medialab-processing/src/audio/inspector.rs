//! Audio inspector - decode an input file and report its stream properties
//!
//! Duration is computed from the actual decoded frame count rather than
//! container hints, so variable-bitrate files report what is really there.

use std::fs::File;
use std::path::Path;

use medialab_core::{MediaError, MediaResult};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::tags;
use crate::metadata::{AudioInfo, TagView};
use crate::traits::MediaProcessor;

pub struct AudioProcessor;

impl MediaProcessor for AudioProcessor {
    type Metadata = AudioInfo;

    fn extract_metadata(&self, path: &Path) -> MediaResult<Self::Metadata> {
        inspect(path)
    }
}

/// Inspect an audio file: duration, channel count, frame rate, bytes per
/// sample, and a simplified ID3 view. A tag read failure becomes the
/// metadata value itself; only a decode failure fails the call.
pub fn inspect(path: &Path) -> MediaResult<AudioInfo> {
    let stats = decode_stats(path)?;

    let metadata = match tags::read_tag_view(path) {
        Ok(view) => TagView::Tags(view),
        Err(err) => TagView::Unavailable(err.to_string()),
    };

    Ok(AudioInfo {
        duration_secs: stats.duration_secs,
        channels: stats.channels,
        frame_rate: stats.frame_rate,
        sample_width: stats.sample_width,
        metadata,
    })
}

struct DecodeStats {
    duration_secs: f64,
    channels: u16,
    frame_rate: u32,
    sample_width: u16,
}

fn decode_stats(path: &Path) -> MediaResult<DecodeStats> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| MediaError::Decode(format!("format probe failed: {e}")))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| MediaError::Decode("no supported audio track found".to_string()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| MediaError::Decode(format!("decoder init failed: {e}")))?;

    let mut total_frames: u64 = 0;
    let mut sample_rate = codec_params.sample_rate.unwrap_or(0);
    let mut channels = codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            // End of stream surfaces as an I/O error.
            Err(SymphoniaError::IoError(_)) => break,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(MediaError::Decode(format!("packet read failed: {e}"))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count() as u16;
                total_frames += decoded.frames() as u64;
            }
            // Corrupt packet; skip.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(SymphoniaError::IoError(_)) => break,
            Err(SymphoniaError::ResetRequired) => decoder.reset(),
            Err(e) => return Err(MediaError::Decode(format!("decode failed: {e}"))),
        }
    }

    if sample_rate == 0 {
        return Err(MediaError::Decode(
            "could not determine sample rate".to_string(),
        ));
    }

    let sample_width = codec_params
        .bits_per_sample
        .map(|bits| (bits / 8).max(1) as u16)
        .unwrap_or(2);

    Ok(DecodeStats {
        duration_secs: total_frames as f64 / sample_rate as f64,
        channels,
        frame_rate: sample_rate,
        sample_width,
    })
}
