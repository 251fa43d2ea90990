//! audition - listen to the four ladder models from the terminal
//!
//! Run with: cargo run --bin audition
//!
//! Four detuned sawtooth lanes play a chord through the filter bank while
//! the cutoff sweeps at control rate. Line commands on stdin:
//!
//!   1-4        select the model (rk, huovilainen, krajeski, improved)
//!   r <value>  set resonance (nominal 0-10)
//!   q          quit

use std::io::BufRead;

use color_eyre::eyre::{eyre, Result, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use vintage_ladder::dsp::{LadderModel, LaneParams};
use vintage_ladder::quad::QuadLadder;
use vintage_ladder::rate::SampleRate;
use vintage_ladder::tuning::EqualTemperament;
use vintage_ladder::LANES;

/// Chord pitches relative to A4 (A2, A3, E4, A4).
const CHORD: [f32; LANES] = [-24.0, -12.0, -5.0, 0.0];

/// Cutoff sweep span in semitones around A4, and sweep speed.
const SWEEP_LOW: f32 = -36.0;
const SWEEP_HIGH: f32 = 24.0;
const SWEEP_RATE_HZ: f32 = 0.15;

#[derive(Debug, Clone, Copy)]
enum Command {
    Model(LadderModel),
    Resonance(f32),
}

/// Naive sawtooth per lane. Aliased, which is fine for auditioning: the
/// extra high-frequency content is exactly what a lowpass demo wants.
struct SawBank {
    phase: [f32; LANES],
    incr: [f32; LANES],
}

impl SawBank {
    fn new(sample_rate: f32) -> Self {
        let mut incr = [0.0; LANES];
        for (lane, pitch) in CHORD.iter().enumerate() {
            let freq = 440.0 * (pitch / 12.0).exp2();
            incr[lane] = freq / sample_rate;
        }
        Self {
            phase: [0.0; LANES],
            incr,
        }
    }

    fn next_frame(&mut self) -> [f32; LANES] {
        let mut frame = [0.0; LANES];
        for lane in 0..LANES {
            frame[lane] = 2.0 * self.phase[lane] - 1.0;
            self.phase[lane] += self.incr[lane];
            if self.phase[lane] >= 1.0 {
                self.phase[lane] -= 1.0;
            }
        }
        frame
    }
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line {
        "1" => Some(Command::Model(LadderModel::RungeKutta)),
        "2" => Some(Command::Model(LadderModel::Huovilainen)),
        "3" => Some(Command::Model(LadderModel::Krajeski)),
        "4" => Some(Command::Model(LadderModel::Improved)),
        _ => line
            .strip_prefix("r ")
            .and_then(|value| value.trim().parse().ok())
            .map(Command::Resonance),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    println!("=== vintage_ladder audition ===");
    println!("Sample rate: {} Hz", sample_rate);
    println!("Channels: {}", channels);
    println!();
    println!("Commands: 1=rk  2=huovilainen  3=krajeski  4=improved  r <0-10>  q");
    println!();

    let (mut tx, mut rx) = rtrb::RingBuffer::<Command>::new(64);

    let mut quad = QuadLadder::new(
        LadderModel::Huovilainen,
        SampleRate::new(f64::from(sample_rate)),
    );
    for lane in 0..LANES {
        quad.set_active(lane, true);
    }
    let mut saws = SawBank::new(sample_rate);
    let mut resonance = 0.4f32;
    let mut sweep_phase = 0.0f32;
    let sweep_incr = SWEEP_RATE_HZ / sample_rate;

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            while let Ok(command) = rx.pop() {
                match command {
                    Command::Model(model) => quad.set_model(model),
                    Command::Resonance(value) => resonance = value,
                }
            }

            // Control block: advance the sweep and retune every lane once
            // per callback, before any samples are rendered.
            let frames = data.len() / channels;
            sweep_phase = (sweep_phase + sweep_incr * frames as f32).fract();
            let triangle = 1.0 - (2.0 * sweep_phase - 1.0).abs();
            let cutoff_pitch = SWEEP_LOW + (SWEEP_HIGH - SWEEP_LOW) * triangle;
            for lane in 0..LANES {
                quad.tune_lane(
                    lane,
                    LaneParams {
                        cutoff_pitch,
                        resonance,
                    },
                    &EqualTemperament,
                );
            }

            for frame in data.chunks_mut(channels) {
                let filtered = quad.process(saws.next_frame());
                let mix = filtered.iter().sum::<f32>() * 0.2;
                for sample in frame.iter_mut() {
                    *sample = mix;
                }
            }
        },
        |err| eprintln!("Audio error: {}", err),
        None,
    )?;

    stream.play()?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.wrap_err("failed to read stdin")?;
        if line.trim() == "q" {
            break;
        }
        match parse_command(&line) {
            Some(command) => {
                if tx.push(command).is_err() {
                    eprintln!("control queue full, command dropped");
                }
            }
            None => println!("unrecognized command: {}", line.trim()),
        }
    }

    Ok(())
}
