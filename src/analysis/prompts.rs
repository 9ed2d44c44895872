//! Prompt templates for query analysis.

/// Asks for 5-8 legal keywords on a single `KEYWORDS:` line.
pub fn keyword_prompt(query: &str) -> String {
    format!(
        r#"Sen Türk hukuk uzmanısın. Bu dava açıklamasından arama için önemli keywordleri çıkar:

"{query}"

Sadece şu formatta yanıtla:
KEYWORDS: [virgülle ayrılmış 5-8 önemli hukuki terim]

Örnek:
KEYWORDS: nafaka, boşanma, velayet, tazminat, aile hukuku
KEYWORDS: kasten öldürme, meşru müdafaa, ceza hukuku, savunma
KEYWORDS: iş kazası, tazminat, işveren sorumluluğu, güvenlik önlemi
"#
    )
}

/// Asks for case type, main topic and search terms.
pub fn intent_prompt(query: &str) -> String {
    format!(
        r#"Sen Türk hukuk uzmanısın. Bu davayı analiz et:

"{query}"

Sadece şu bilgileri ver:
1. Dava türü: [Ceza/Aile/Medeni/İş/İdari]
2. Ana konu: [Tek cümle]
3. Arama terimleri: [3-5 kelime, virgülle ayrılmış]
"#
    )
}
