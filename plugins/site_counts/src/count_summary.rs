//! Published-content counts, one sentence per public content type.

use site_counts_sdk::prelude::*;
use tracing::warn;

use crate::TEXT_DOMAIN;

/// Sentence describing `count` published items of `content_type`.
pub fn count_sentence(
    translator: &dyn Translator,
    language: Option<&str>,
    content_type: &ContentType,
    count: u64,
) -> String {
    if count == 0 {
        let template = translator.translate(TEXT_DOMAIN, language, "There are no {label}.");
        return interpolate(&template, &[("label", content_type.plural_label.as_str())]);
    }

    let template = translator.translate_plural(
        TEXT_DOMAIN,
        language,
        "There is {count} {label}.",
        "There are {count} {label}.",
        count,
    );
    let label = if count == 1 {
        content_type.singular_label.as_str()
    } else {
        content_type.plural_label.as_str()
    };
    interpolate(&template, &[("count", count.to_string().as_str()), ("label", label)])
}

/// Build the sentences for every public content type, in registry order.
///
/// A registry failure yields no sentences; a failed count drops only that
/// type's sentence.
pub async fn sentences(services: &RenderServices<'_>, language: Option<&str>) -> Vec<String> {
    let content_types = match services.host.list_public_content_types().await {
        Ok(types) => types,
        Err(e) => {
            warn!(error = %e, "content type registry unavailable, count summary left empty");
            return Vec::new();
        }
    };

    let mut lines = Vec::with_capacity(content_types.len());
    for content_type in content_types.iter().filter(|t| t.public) {
        match services.host.count_published(&content_type.name).await {
            Ok(count) => lines.push(count_sentence(
                services.translator,
                language,
                content_type,
                count,
            )),
            Err(e) => {
                warn!(content_type = %content_type.name, error = %e, "published count unavailable");
            }
        }
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use site_counts_test_utils::{StubHost, page_type, post_type};

    fn sentence(count: u64) -> String {
        count_sentence(&SourceStrings, None, &post_type(), count)
    }

    #[test]
    fn zero_uses_plural_label() {
        assert_eq!(sentence(0), "There are no Posts.");
    }

    #[test]
    fn one_uses_singular_label() {
        assert_eq!(sentence(1), "There is 1 Post.");
    }

    #[test]
    fn many_uses_plural_label() {
        assert_eq!(sentence(5), "There are 5 Posts.");
        assert_eq!(sentence(2), "There are 2 Posts.");
    }

    #[tokio::test]
    async fn one_sentence_per_public_type_in_order() {
        let host = StubHost::new()
            .with_type(post_type(), 3)
            .with_type(ContentType::new("secret", "Secret", "Secrets").private(), 9)
            .with_type(page_type(), 0);
        let services = RenderServices {
            host: &host,
            translator: &SourceStrings,
        };

        let lines = sentences(&services, None).await;
        assert_eq!(lines, vec!["There are 3 Posts.", "There are no Pages."]);
    }

    #[tokio::test]
    async fn failed_count_drops_only_that_type() {
        let host = StubHost::new()
            .with_type(post_type(), 1)
            .with_type(page_type(), 4)
            .failing_count("post");
        let services = RenderServices {
            host: &host,
            translator: &SourceStrings,
        };

        assert_eq!(sentences(&services, None).await, vec!["There are 4 Pages."]);
    }

    #[tokio::test]
    async fn failed_registry_yields_nothing() {
        let host = StubHost::new().with_type(post_type(), 1).failing_types();
        let services = RenderServices {
            host: &host,
            translator: &SourceStrings,
        };

        assert!(sentences(&services, None).await.is_empty());
    }
}
