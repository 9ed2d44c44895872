//! `emsal` command-line entrypoint.

use anyhow::bail;
use clap::Parser;
use mimalloc::MiMalloc;

use emsal::config::Config;
use emsal::explain::format_percent;
use emsal::retriever::{DefaultRetriever, RankedResult};
use emsal::scoring::CandidateResult;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const RULE_WIDTH: usize = 60;
const BROWSE_SNIPPET_CHARS: usize = 200;
const HIGHLIGHT_SNIPPET_CHARS: usize = 300;

#[derive(Parser, Debug)]
#[command(name = "emsal")]
#[command(about = "Türk Hukuk Emsal Karar Sistemi: faydalı emsal kararları bulur", long_about = None)]
#[command(after_help = "Örnek:\n  emsal \"Boşanma davasında nafaka miktarı konusunda emsal karar arıyorum\"")]
struct Cli {
    #[arg(help = "Dava açıklaması (doğal dil)")]
    case_description: String,

    #[arg(long, help = "Tüm 20 kararı göster")]
    show_all: bool,

    #[arg(long, help = "Karar özetlerini göster")]
    show_snippets: bool,

    #[arg(long, help = "Benzerlik, keyword ve fayda skorlarını göster")]
    show_scores: bool,

    #[arg(long, help = "Kararların tam içeriğini göster")]
    show_content: bool,

    #[arg(long, default_value_t = 1000, help = "İçerik karakter limiti")]
    content_limit: usize,

    #[arg(long, help = "Sonucu JSON olarak yazdır")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let query = cli.case_description.trim();
    if query.is_empty() {
        bail!("dava açıklaması boş olamaz");
    }

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        index = %config.index_path.display(),
        db = %config.db_path.display(),
        llm = config.llm_model.as_deref().unwrap_or("none"),
        "emsal starting"
    );

    let retriever = DefaultRetriever::open(&config)?;
    let result = retriever.search_beneficial_precedents(query).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render(&cli, query, &result);
    }

    Ok(())
}

fn render(cli: &Cli, query: &str, result: &RankedResult) {
    let rule = "=".repeat(RULE_WIDTH);

    println!("Türk Hukuk Emsal Karar Sistemi");
    println!("{rule}");
    println!("Dava: {query}");
    println!("{rule}");
    println!("\n{} faydalı emsal karar bulundu", result.top_20_results.len());

    if cli.show_all {
        println!("\nİlk {} Emsal Karar:", result.top_20_results.len());
        println!("{}", "-".repeat(RULE_WIDTH));
        for (i, decision) in result.top_20_results.iter().enumerate() {
            println!("{:2}. {}", i + 1, heading(decision));
            if cli.show_scores {
                println!("     {}", score_line(decision));
            }
            if cli.show_snippets {
                println!("     Özet: {}", preview(&decision.snippet, BROWSE_SNIPPET_CHARS));
            }
            if cli.show_content && !decision.full_text.is_empty() {
                println!("     İçerik: {}", preview(&decision.full_text, cli.content_limit));
            }
            println!();
        }
    }

    println!("\nEn İyi 3 Emsal Karar (Dilekçe İçin En Faydalı):");
    println!("{rule}");
    for (i, decision) in result.top_3_results.iter().enumerate() {
        println!("{}. {}", i + 1, heading(decision));
        println!("   {}", score_line(decision));
        if cli.show_snippets {
            println!("   Özet: {}", preview(&decision.snippet, HIGHLIGHT_SNIPPET_CHARS));
        }
        if cli.show_content && !decision.full_text.is_empty() {
            println!("   İçerik: {}", preview(&decision.full_text, cli.content_limit));
        }
        println!("{}", "-".repeat(40));
    }

    println!("\nUzman Analizi (En İyi 3 Kararın Kullanımı):");
    println!("{rule}");
    println!("{}", result.explanation);

    println!("\nÖzet:");
    println!("   • Toplam bulunan karar: {}", result.total_found);
    println!("   • Dava türü: {}", result.intent.category_label);
    println!("   • Ana konu: {}", result.intent.main_topic);
    println!("   • Arama terimleri: {}", result.intent.search_terms.join(", "));
}

fn heading(decision: &CandidateResult) -> String {
    format!(
        "{} - {} ({})",
        decision.chamber,
        decision.case_numbers(),
        decision.date
    )
}

fn score_line(decision: &CandidateResult) -> String {
    format!(
        "Benzerlik: {} | Keyword: {} | Fayda: {} | Toplam: {}",
        format_percent(decision.semantic_score()),
        format_percent(decision.keyword_score()),
        format_percent(decision.benefit_score()),
        format_percent(decision.score)
    )
}

/// First `limit` characters of `text`, with `...` appended when truncated.
fn preview(text: &str, limit: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
