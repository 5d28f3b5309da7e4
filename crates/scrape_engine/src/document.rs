use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use scrape_logging::scrape_warn;
use scraper::Html;

use crate::FetchOutput;

/// A fetched page decoded to UTF-8.
///
/// Holds source text only; `tree()` parses it on demand so the document can
/// cross await points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub url: String,
    pub html: String,
    pub encoding_label: String,
}

impl Document {
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            encoding_label: "UTF-8".to_string(),
        }
    }

    /// Decode using: BOM -> Content-Type charset -> chardetng guess.
    ///
    /// Malformed sequences become U+FFFD rather than failing the page.
    pub fn from_bytes(url: impl Into<String>, bytes: &[u8], content_type: Option<&str>) -> Self {
        let url = url.into();
        let encoding = detect_encoding(bytes, content_type);
        let (text, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            scrape_warn!(
                "Malformed {} bytes in {}; replaced invalid sequences",
                encoding.name(),
                url
            );
        }
        Self {
            url,
            html: text.into_owned(),
            encoding_label: encoding.name().to_string(),
        }
    }

    pub fn from_fetch(output: &FetchOutput) -> Self {
        Self::from_bytes(
            output.metadata.final_url.clone(),
            &output.bytes,
            output.metadata.content_type.as_deref(),
        )
    }

    /// Parse into a traversable tree.
    pub fn tree(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

fn detect_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if let Some(enc) = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return enc;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(['"', '\'']).to_string())
        } else {
            None
        }
    })
}
