use std::fmt::Write;

use crate::scoring::CandidateResult;

const SNIPPET_PREVIEW_CHARS: usize = 150;

/// Formats a `[0, 1]` score as a one-decimal percentage (`0.756` → `"75.6%"`).
pub fn format_percent(value: f32) -> String {
    format!("{:.1}%", value * 100.0)
}

fn score_line(candidate: &CandidateResult) -> String {
    format!(
        "Benzerlik: {} | Keyword: {} | Fayda: {}",
        format_percent(candidate.semantic_score()),
        format_percent(candidate.keyword_score()),
        format_percent(candidate.benefit_score())
    )
}

/// Prompt asking for per-decision guidance and an overall assessment, in Turkish.
pub fn explanation_prompt(query: &str, top: &[CandidateResult]) -> String {
    let mut decisions = String::new();
    for (i, candidate) in top.iter().enumerate() {
        let preview: String = candidate.snippet.chars().take(SNIPPET_PREVIEW_CHARS).collect();
        let _ = write!(
            decisions,
            "\n{}. {} - {} ({})\n   {}\n   Özet: {}...\n",
            i + 1,
            candidate.chamber,
            candidate.case_numbers(),
            candidate.date,
            score_line(candidate),
            preview
        );
    }

    format!(
        r#"Sen deneyimli bir Türk avukatısın. Bu {count} emsal kararı analiz et:

DAVA: "{query}"

EMSAL KARARLAR:
{decisions}
Her karar için şunları açıkla:
1. Bu karar nasıl emsal olarak kullanılabilir?
2. Dilekçede hangi argümanları destekler?
3. Dikkat edilmesi gereken noktalar nelerdir?

Sonra genel değerlendirme:
- Bu kararların gücü nedir?
- Hangi noktalara odaklanmalı?
- Tahmini başarı şansı nedir?

SADECE TÜRKÇE YANITLA. Kısa ve öz ol.
"#,
        count = top.len()
    )
}

/// Template explanation naming every decision in `top` with its three scores.
pub fn fallback_explanation(top: &[CandidateResult]) -> String {
    let mut text = String::from("**En İyi 3 Emsal Kararın Değerlendirmesi:**\n\n");

    for (i, candidate) in top.iter().enumerate() {
        let _ = writeln!(
            text,
            "{}. **{}** ({}):",
            i + 1,
            candidate.chamber,
            candidate.case_numbers()
        );
        let _ = writeln!(text, "   - {}", score_line(candidate));
        text.push_str("   - Bu karar, sorunuzla ilgili hukuki prensipleri içermektedir.\n");
        text.push_str("   - Dilekçenizde emsal olarak kullanılabilir.\n\n");
    }

    text.push_str(
        "**Genel Değerlendirme:** Bu kararlar, sorunuzla ilgili en uygun ve faydalı hukuki emsalleri içermektedir.",
    );
    text
}
