//! Sine Tone Channel
//!
//! cpal の出力ストリームで短いサイン波を鳴らす

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use log::{debug, warn};
use std::f32::consts::TAU;
use std::time::Duration;

use crate::domain::repositories::alert_channel::ToneChannel;

/// 完了音の周波数（Hz）
pub const DEFAULT_FREQUENCY_HZ: f32 = 440.0;

/// 完了音の振幅（0.0..=1.0）
pub const DEFAULT_AMPLITUDE: f32 = 0.2;

/// 指定フレーム数だけサイン波を生成し、その後は無音を返す発振器
#[derive(Debug, Clone)]
pub struct SineOscillator {
    phase: f32,
    step: f32,
    amplitude: f32,
    remaining_frames: u64,
}

impl SineOscillator {
    /// # Arguments
    ///
    /// * `frequency` - 周波数（Hz）
    /// * `amplitude` - 振幅
    /// * `sample_rate` - 出力デバイスのサンプルレート
    /// * `duration` - 鳴らす長さ
    pub fn new(frequency: f32, amplitude: f32, sample_rate: u32, duration: Duration) -> Self {
        let remaining_frames = (duration.as_secs_f64() * f64::from(sample_rate)).round() as u64;
        Self {
            phase: 0.0,
            step: TAU * frequency / sample_rate as f32,
            amplitude: amplitude.clamp(0.0, 1.0),
            remaining_frames,
        }
    }

    /// 次の1フレーム分のサンプル
    pub fn next_sample(&mut self) -> f32 {
        if self.remaining_frames == 0 {
            return 0.0;
        }
        self.remaining_frames -= 1;

        let value = self.phase.sin() * self.amplitude;
        self.phase = (self.phase + self.step) % TAU;
        value
    }

    /// 鳴らし終えたかどうか
    pub fn is_finished(&self) -> bool {
        self.remaining_frames == 0
    }

    /// インターリーブされたバッファを埋める（全チャネルに同じ値）
    pub fn fill<T>(&mut self, data: &mut [T], channels: usize)
    where
        T: Sample + FromSample<f32>,
    {
        for frame in data.chunks_mut(channels.max(1)) {
            let value = T::from_sample(self.next_sample());
            for sample in frame.iter_mut() {
                *sample = value;
            }
        }
    }
}

/// サイン波の完了音チャネル
///
/// 出力デバイスがなければ `play` は `Err` を返す
pub struct SineToneChannel {
    frequency: f32,
    amplitude: f32,
}

impl SineToneChannel {
    pub fn new() -> Self {
        Self::with_frequency(DEFAULT_FREQUENCY_HZ)
    }

    pub fn with_frequency(frequency: f32) -> Self {
        Self {
            frequency,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl Default for SineToneChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToneChannel for SineToneChannel {
    async fn play(&self, duration: Duration) -> Result<()> {
        let frequency = self.frequency;
        let amplitude = self.amplitude;

        // cpal の Stream は Send ではないため、ブロッキングスレッドで生成から停止まで行う
        tokio::task::spawn_blocking(move || play_blocking(frequency, amplitude, duration))
            .await
            .context("Tone playback task failed")?
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn play_blocking(frequency: f32, amplitude: f32, duration: Duration) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("No audio output device available")?;
    let supported = device
        .default_output_config()
        .context("Failed to query default output config")?;

    let sample_format = supported.sample_format();
    let config: StreamConfig = supported.config();
    debug!(
        "Playing {} Hz tone for {:?} ({} Hz, {} ch, {:?})",
        frequency, duration, config.sample_rate.0, config.channels, sample_format
    );

    let oscillator = SineOscillator::new(frequency, amplitude, config.sample_rate.0, duration);
    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, oscillator)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, oscillator)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, oscillator)?,
        other => bail!("Unsupported sample format: {:?}", other),
    };

    stream.play().context("Failed to start tone stream")?;
    std::thread::sleep(duration);
    if let Err(e) = stream.pause() {
        debug!("Failed to pause tone stream: {}", e);
    }
    Ok(())
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut oscillator: SineOscillator,
) -> Result<Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| oscillator.fill(data, channels),
            move |err| warn!("Tone stream error: {}", err),
            None,
        )
        .context("Failed to build tone stream")
}
