use std::path::Path;

use {
    anyhow::{Result, bail},
    emofuse_config::EmofuseConfig,
    emofuse_emoji::EmojiResolver,
    emofuse_fusion::{SweepReport, SweepSample, sweep_weights, weight_grid},
    emofuse_media::segment,
};

use crate::input::{Record, read_records};

pub fn sweep(config: &EmofuseConfig, input: &Path, step: f32, json: bool) -> Result<()> {
    let records = read_records(Some(input))?;
    let resolver = EmojiResolver::from_config(&config.lexicon)?;
    let samples = to_samples(&resolver, &records)?;
    let report = sweep_weights(&samples, &weight_grid(step)?, &config.smoothing)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, config.fusion.emoji_weight);
    }
    Ok(())
}

fn to_samples(resolver: &EmojiResolver, records: &[Record]) -> Result<Vec<SweepSample>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let positive = match record.label {
                Some(1) => true,
                Some(0) => false,
                Some(other) => bail!("record {}: label must be 0 or 1, got {other}", i + 1),
                None => bail!("record {}: missing label", i + 1),
            };
            let parsed = segment(&record.message);
            Ok(SweepSample {
                emoji_score: resolver.resolve_sequence(parsed.emojis()),
                image_score: record.image_score,
                text_score: record.text_score,
                residual_text: parsed.residual_text,
                emoji_sequence: parsed.emoji_sequence,
                positive,
            })
        })
        .collect()
}

fn print_report(report: &SweepReport, current: f32) {
    println!("weight  accuracy");
    for r in &report.results {
        let marker = if r.weight == report.best_weight {
            "  <- best"
        } else {
            ""
        };
        println!("{:>6.2}  {:>8.3}{marker}", r.weight, r.accuracy);
    }
    println!(
        "\nbest emoji_weight = {:.2} (accuracy {:.3} over {} samples; configured {current:.2})",
        report.best_weight, report.best_accuracy, report.samples
    );
}
