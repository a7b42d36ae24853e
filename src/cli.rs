use log::{debug, info, LevelFilter};
use pitchshift::effect::load_props;
use pitchshift::io::wav::{read_wav_file, write_wav_file_float, WavAudio};
use pitchshift::{
    create_effect, render, EffectProps, EffectType, PitchShiftError, PshifterProps, RenderOptions,
    BUFFER_LINE_SIZE, LATENCY_SAMPLES,
};

/// Options gathered from the command line.
#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    input_path: String,
    output_path: String,
    coarse: Option<i32>,
    fine: Option<i32>,
    cents: Option<i32>,
    props_path: Option<String>,
    effect: Option<EffectType>,
    block_size: usize,
    gain: f32,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage();
        std::process::exit(1);
    }

    let options = match parse_args(&args[1..]) {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("ERROR: {}", msg);
            print_usage();
            std::process::exit(1);
        }
    };

    let default_level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&options) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(options: &CliOptions) -> Result<(), PitchShiftError> {
    let props = resolve_props(options)?;
    let audio = read_wav_file(&options.input_path)?;
    let mono = audio.to_mono();

    info!(
        "Input: {} frames, {} Hz, {} channel(s), {:.2}s",
        audio.num_frames(),
        audio.sample_rate,
        audio.channels,
        audio.num_frames() as f64 / audio.sample_rate as f64
    );
    match &props {
        EffectProps::PitchShifter(p) => info!(
            "Tuning: {:+} semitones {:+} cents (ratio {:.4})",
            p.coarse_tune,
            p.fine_tune,
            p.pitch_ratio().as_f64()
        ),
        EffectProps::Null => info!("Tuning: none (null effect)"),
    }
    debug!(
        "Block size {} samples, latency {} samples, slot gain {}",
        options.block_size, LATENCY_SAMPLES, options.gain
    );

    let render_options = RenderOptions::default()
        .with_sample_rate(audio.sample_rate)
        .with_channels(audio.channels as usize)
        .with_block_size(options.block_size)
        .with_slot_gain(options.gain);
    let mut effect = create_effect(props.effect_type());
    let output = render(effect.as_mut(), &props, &mono, &render_options);

    let out_channels = if audio.channels > 1 { 2 } else { 1 };
    let out = WavAudio::new(output, audio.sample_rate, out_channels);
    write_wav_file_float(&options.output_path, &out)?;
    info!("Written to {}", options.output_path);
    Ok(())
}

/// Builds the effect properties: a props file first, then tuning flags on top.
fn resolve_props(options: &CliOptions) -> Result<EffectProps, PitchShiftError> {
    let effect = options.effect.unwrap_or(EffectType::PitchShifter);
    if effect == EffectType::Null {
        return Ok(EffectProps::default_for(effect));
    }
    let props = match &options.props_path {
        Some(path) => load_props(path)?,
        None => EffectProps::default_for(effect),
    };

    let has_tuning = options.coarse.is_some() || options.fine.is_some() || options.cents.is_some();
    if !has_tuning {
        if let EffectProps::PitchShifter(p) = &props {
            p.validate()?;
        }
        return Ok(props);
    }

    let mut tuning = match props {
        EffectProps::PitchShifter(p) => p,
        EffectProps::Null => PshifterProps::default(),
    };
    if let Some(cents) = options.cents {
        tuning = PshifterProps::from_cents(cents);
    }
    if let Some(coarse) = options.coarse {
        tuning.coarse_tune = coarse;
    }
    if let Some(fine) = options.fine {
        tuning.fine_tune = fine;
    }
    tuning.validate()?;
    Ok(EffectProps::PitchShifter(tuning))
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    if args.len() < 2 {
        return Err("expected <input.wav> <output.wav>".to_string());
    }
    let mut options = CliOptions {
        input_path: args[0].clone(),
        output_path: args[1].clone(),
        coarse: None,
        fine: None,
        cents: None,
        props_path: None,
        effect: None,
        block_size: BUFFER_LINE_SIZE,
        gain: 1.0,
        verbose: false,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--coarse" | "-c" => {
                i += 1;
                options.coarse = Some(parse_value(args, i, "coarse")?);
            }
            "--fine" | "-f" => {
                i += 1;
                options.fine = Some(parse_value(args, i, "fine")?);
            }
            "--cents" => {
                i += 1;
                options.cents = Some(parse_value(args, i, "cents")?);
            }
            "--props" => {
                i += 1;
                options.props_path = Some(value_at(args, i, "props")?.to_string());
            }
            "--block" | "-b" => {
                i += 1;
                let block: usize = parse_value(args, i, "block")?;
                if block == 0 || block > BUFFER_LINE_SIZE {
                    return Err(format!(
                        "--block must be between 1 and {}, got {}",
                        BUFFER_LINE_SIZE, block
                    ));
                }
                options.block_size = block;
            }
            "--gain" | "-g" => {
                i += 1;
                let gain: f32 = parse_value(args, i, "gain")?;
                if !gain.is_finite() || gain < 0.0 {
                    return Err(format!("--gain must be a non-negative number, got {}", gain));
                }
                options.gain = gain;
            }
            "--effect" => {
                i += 1;
                let name = value_at(args, i, "effect")?;
                let ty: EffectType = name.parse().map_err(|e: PitchShiftError| e.to_string())?;
                options.effect = Some(ty);
            }
            "--verbose" | "-v" => options.verbose = true,
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }
    Ok(options)
}

fn value_at<'a>(args: &'a [String], i: usize, name: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("--{} requires a value", name))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, name: &str) -> Result<T, String> {
    let raw = value_at(args, i, name)?;
    raw.parse::<T>()
        .map_err(|_| format!("invalid value for --{}: '{}'", name, raw))
}

fn print_usage() {
    eprintln!("Usage: pitchshift-cli <input.wav> <output.wav> [options]");
    eprintln!();
    eprintln!("Tuning:");
    eprintln!("  --coarse, -c <n>   Semitones, -12..=12 (default: 0)");
    eprintln!("  --fine, -f <n>     Cents, -50..=50 (default: 0)");
    eprintln!("  --cents <n>        Total cents, split into coarse and fine");
    eprintln!("  --props <file>     JSON effect properties; tuning flags override it");
    eprintln!();
    eprintln!("Options:");
    eprintln!(
        "  --block, -b <n>    Samples per processing call, 1..={} (default: {})",
        BUFFER_LINE_SIZE, BUFFER_LINE_SIZE
    );
    eprintln!("  --gain, -g <x>     Output slot gain (default: 1.0)");
    eprintln!("  --effect <name>    pitch_shifter (default) or null (bypass to silence)");
    eprintln!("  --verbose, -v      Debug logging (RUST_LOG overrides)");
    eprintln!();
    eprintln!("Input may be mono or stereo; it is mixed to mono before shifting.");
    eprintln!("Output is 32-bit float WAV at the input sample rate.");
}
