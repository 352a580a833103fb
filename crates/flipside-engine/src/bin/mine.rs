use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel;
use flipside_engine::{append_sink, MineError, MinerConfig, PuzzleMiner, PuzzleRecord, Selection};
use tracing::{info, warn};

const USAGE: &str = "usage: mine <transcripts> [output] [workers] [min-move] [depth] [gap|sign] [resume-from]";

fn parse_selection(arg: Option<&String>) -> Selection {
    match arg.map(String::as_str) {
        Some("sign") => Selection::SignSplit,
        Some(text) => match text.parse::<f32>() {
            Ok(threshold) => Selection::GapThreshold(threshold),
            Err(_) => {
                warn!("unknown selection {text:?}, defaulting to gap threshold 40");
                Selection::GapThreshold(40.0)
            }
        },
        None => Selection::GapThreshold(40.0),
    }
}

fn parse_depth(arg: Option<&String>) -> Option<u8> {
    match arg.map(String::as_str) {
        None | Some("-") => None,
        Some(text) => match text.parse::<u8>() {
            Ok(depth) => Some(depth),
            Err(_) => {
                warn!("unparseable depth {text:?}, using the depth policy");
                None
            }
        },
    }
}

/// One transcript per line; delimited lines keep their last field, which
/// covers `id,game_moves`-shaped datasets without a CSV reader.
fn load_transcripts(path: &Path, resume_from: usize) -> Result<Vec<String>, std::io::Error> {
    let reader = BufReader::new(File::open(path)?);
    let mut transcripts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let field = line.rsplit(',').next().unwrap_or(&line).trim();
        if field.is_empty() {
            continue;
        }
        transcripts.push(field.to_string());
    }
    Ok(transcripts.split_off(resume_from.min(transcripts.len())))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(input) = args.get(1) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let output = args.get(2).map(String::as_str).unwrap_or("puzzles.jsonl");
    let workers: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
    });
    let min_move_number: u32 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(55);
    let depth = parse_depth(args.get(5));
    let selection = parse_selection(args.get(6));
    let resume_from: usize = args.get(7).and_then(|s| s.parse().ok()).unwrap_or(0);

    let config = MinerConfig {
        min_move_number,
        depth,
        selection,
        ..MinerConfig::default()
    };

    let transcripts = load_transcripts(Path::new(input), resume_from)?;
    info!(
        "mining {} transcripts (resumed at {resume_from}) on {workers} workers into {output}",
        transcripts.len()
    );

    let (task_tx, task_rx) = channel::bounded::<(usize, String)>(1024);
    let (record_tx, record_rx) = channel::bounded::<PuzzleRecord>(1024);

    // Single serializing sink: one writer thread owns the append-only
    // output, so every record hitting disk is complete and a crash cannot
    // interleave or lose flushed lines. Output order is completion order.
    let output_path = output.to_string();
    let writer = thread::spawn(move || -> Result<u64, MineError> {
        let mut sink = append_sink(Path::new(&output_path))?;
        let mut emitted = 0u64;
        for record in record_rx {
            sink.emit(&record)?;
            emitted += 1;
            if emitted % 100 == 0 {
                info!("emitted {emitted} puzzle records");
            }
        }
        Ok(emitted)
    });

    let skipped = Arc::new(AtomicU64::new(0));
    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let task_rx = task_rx.clone();
        let record_tx = record_tx.clone();
        let skipped = Arc::clone(&skipped);
        handles.push(thread::spawn(move || {
            let mut miner = PuzzleMiner::new(config);
            for (index, transcript) in task_rx {
                match miner.mine_transcript(&transcript) {
                    Ok(records) => {
                        for record in records {
                            if record_tx.send(record).is_err() {
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        warn!("skipping transcript {}: {err}", index + 1);
                        skipped.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        }));
    }
    drop(task_rx);
    drop(record_tx);

    let total = transcripts.len();
    for (index, transcript) in transcripts.into_iter().enumerate() {
        if task_tx.send((resume_from + index, transcript)).is_err() {
            break;
        }
        if (index + 1) % 1_000 == 0 {
            info!("queued {}/{total} transcripts", index + 1);
        }
    }
    drop(task_tx);

    for handle in handles {
        if handle.join().is_err() {
            warn!("a mining worker panicked");
        }
    }
    let emitted = writer
        .join()
        .map_err(|_| "writer thread panicked")??;

    info!(
        "done: {total} transcripts, {emitted} records emitted, {} skipped",
        skipped.load(Ordering::Relaxed)
    );
    Ok(())
}
