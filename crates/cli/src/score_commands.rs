use std::path::Path;

use {
    anyhow::Result,
    emofuse_config::{EmofuseConfig, ImageFallback},
    emofuse_emoji::EmojiResolver,
    emofuse_media::{ParsedMessage, segment_batch},
    emofuse_pipeline::{MessageSentiment, SentimentPipeline},
    tracing::info,
};

use crate::input::{Record, read_records};

pub fn segment(messages: &[String]) -> Result<()> {
    for parsed in segment_batch(messages) {
        println!("{}", serde_json::to_string(&parsed)?);
    }
    Ok(())
}

pub fn emoji(config: &EmofuseConfig, input: &str, json: bool) -> Result<()> {
    let resolver = EmojiResolver::from_config(&config.lexicon)?;
    let parsed = emofuse_media::segment(input);
    if parsed.emoji_sequence.is_none() {
        eprintln!("No emoji found.");
        return Ok(());
    }

    let mut entries = Vec::new();
    for emoji in parsed.emojis() {
        let resolution = resolver.resolve_emoji(emoji);
        if json {
            entries.push(serde_json::json!({
                "emoji": emoji,
                "resolution": resolution,
            }));
            continue;
        }
        match resolution {
            Some(r) => {
                let source = format!("{:?}", r.source);
                let forced = if r.forced_negative {
                    " (forced negative)"
                } else {
                    ""
                };
                println!(
                    "  {emoji}  {name:<28} {source:<17} raw {raw:>6.2}  score {score:>6.2}{forced}",
                    name = r.name.as_deref().unwrap_or("?"),
                    raw = r.raw,
                    score = r.score,
                );
            },
            None => println!("  {emoji}  unresolved"),
        }
    }

    let sequence = resolver.resolve_sequence(parsed.emojis());
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "emojis": entries,
                "score": sequence,
            }))?
        );
    } else {
        match sequence {
            Some(score) => println!("\nsequence score: {score:.3}"),
            None => println!("\nsequence score: none"),
        }
    }
    Ok(())
}

pub async fn score(config: &EmofuseConfig, input: Option<&Path>) -> Result<()> {
    let records = read_records(input)?;
    let pipeline = SentimentPipeline::from_config(config)?;
    let reports = score_records(&pipeline, config.pipeline.image_fallback, &records)?;
    info!(messages = reports.len(), "scored batch");
    for report in &reports {
        println!("{}", serde_json::to_string(report)?);
    }
    Ok(())
}

/// Fuse the scores carried by `records`. With the neutral image fallback, an
/// image without a score counts as 0.0.
fn score_records(
    pipeline: &SentimentPipeline,
    image_fallback: ImageFallback,
    records: &[Record],
) -> Result<Vec<MessageSentiment>> {
    let messages: Vec<String> = records.iter().map(|r| r.message.clone()).collect();
    let parsed: Vec<ParsedMessage> = segment_batch(&messages);

    let text_scores: Vec<Option<f32>> = records.iter().map(|r| r.text_score).collect();
    let image_scores: Vec<Option<f32>> = records
        .iter()
        .zip(&parsed)
        .map(|(r, p)| match (r.image_score, &p.image_ref, image_fallback) {
            (Some(s), ..) => Some(s),
            (None, Some(_), ImageFallback::Neutral) => Some(0.0),
            _ => None,
        })
        .collect();

    Ok(pipeline.score_parsed(&messages, parsed, &text_scores, &image_scores)?)
}
