use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use super::Resampler;
use crate::asr::EngineError;

/// Sample rate whisper.cpp expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

const RESAMPLE_CHUNK: usize = 1024;

/// Decodes a compressed or PCM audio file into 16kHz mono f32 samples.
pub fn decode_to_mono_16k(data: Vec<u8>, content_type: &str) -> Result<Vec<f32>, EngineError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension_for(content_type) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| EngineError::Unsupported(format!("probe failed: {}", e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| EngineError::Unsupported("no audio track found".into()))?;

    let codec_params = track.codec_params.clone();
    let track_id = track.id;
    let source_rate = codec_params.sample_rate.unwrap_or(TARGET_SAMPLE_RATE);
    let channels = codec_params.channels.map_or(1, |c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| EngineError::Unsupported(format!("codec init failed: {}", e)))?;

    let mut mono: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(EngineError::Decode(format!("packet read: {}", e))),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| EngineError::Decode(e.to_string()))?;

        let spec = *decoded.spec();
        let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buf.copy_interleaved_ref(decoded);

        if channels > 1 {
            mono.extend(
                buf.samples()
                    .chunks(channels)
                    .map(|frame| frame.iter().sum::<f32>() / channels as f32),
            );
        } else {
            mono.extend_from_slice(buf.samples());
        }
    }

    if mono.is_empty() {
        return Err(EngineError::Decode("no audio samples decoded".into()));
    }
    debug!(samples = mono.len(), source_rate, channels, "Audio decoded");

    if source_rate == TARGET_SAMPLE_RATE {
        return Ok(mono);
    }

    let mut resampler = Resampler::new(source_rate, TARGET_SAMPLE_RATE, RESAMPLE_CHUNK)
        .map_err(|e| EngineError::Decode(e.to_string()))?;
    let mut out = resampler
        .process(&mono)
        .map_err(|e| EngineError::Decode(e.to_string()))?;
    out.extend(
        resampler
            .flush()
            .map_err(|e| EngineError::Decode(e.to_string()))?,
    );
    Ok(out)
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    let ext = match content_type {
        "audio/wav" | "audio/wave" | "audio/x-wav" => "wav",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" | "audio/aac" => "m4a",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/ogg" => "ogg",
        _ => return None,
    };
    Some(ext)
}
