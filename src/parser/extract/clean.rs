use std::sync::LazyLock;

use regex::Regex;

static PACKAGING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s+(?i:comprimidos?|c[aá]psulas?)\s+Comprimido\s*").unwrap()
});
static TRAILING_FORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+Comprimido\s*$").unwrap());
static SIGNER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-ZÀ-Ú][A-ZÀ-Ú\s]+\s+-\s*\d{10,}").unwrap());
static CAPS_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-ZÀ-Ú]{2,}\s+[A-ZÀ-Ú]{2,}\s+[A-ZÀ-Ú]{2,}(?:\s+[A-ZÀ-Ú]{2,})*\b").unwrap()
});
static FOOTER_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:EMITENTE|CIDADÃO).*$").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Second pass over an extracted field: strips leftover packaging text,
/// signer names and footer tails that survived line filtering.
pub fn clean(text: &str) -> String {
    let text = PACKAGING_RE.replace_all(text, "");
    let text = TRAILING_FORM_RE.replace(&text, "");
    let text = SIGNER_ID_RE.replace_all(&text, "");
    let text = CAPS_RUN_RE.replace_all(&text, "");
    let text = FOOTER_TAIL_RE.replace(&text, "");
    collapse_whitespace(&text)
}

pub fn collapse_whitespace(text: &str) -> String {
    WS_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_untouched() {
        assert_eq!(clean("Tomar 1 comprimido a cada 8 horas"), "Tomar 1 comprimido a cada 8 horas");
    }

    #[test]
    fn packaging_fragment_anywhere() {
        assert_eq!(clean("30 comprimidos Comprimido Tomar 1 ao dia"), "Tomar 1 ao dia");
        assert_eq!(clean("Tomar 1 ao dia 20 cápsulas Comprimido"), "Tomar 1 ao dia");
    }

    #[test]
    fn trailing_form_word() {
        assert_eq!(clean("Tomar 1 à noite Comprimido"), "Tomar 1 à noite");
        assert_eq!(clean("Tomar 1 comprimido"), "Tomar 1 comprimido");
    }

    #[test]
    fn signer_with_long_id() {
        assert_eq!(
            clean("Tomar em jejum NATHALIA BARBOSA RODRIGUES COSTA - 706001819574745"),
            "Tomar em jejum"
        );
    }

    #[test]
    fn caps_run_removed() {
        assert_eq!(clean("Tomar JOSE DA SILVA pela manhã"), "Tomar pela manhã");
        assert_eq!(clean("Uso ORAL pela manhã"), "Uso ORAL pela manhã");
    }

    #[test]
    fn footer_tail() {
        assert_eq!(clean("Tomar à noite emitente ubs"), "Tomar à noite");
        assert_eq!(clean("Tomar à noite CIDADÃO fulano"), "Tomar à noite");
    }

    #[test]
    fn whitespace() {
        assert_eq!(clean("  Tomar \t 1\n\nao dia  "), "Tomar 1 ao dia");
        assert_eq!(clean(""), "");
    }
}
