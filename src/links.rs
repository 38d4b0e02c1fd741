//! Outbound URL construction.
//!
//! Every link that leaves the site is built here from a template in
//! [`LinksConfig`]: `{id}` is replaced by the form-urlencoded record
//! identifier and `{tier}` by a thumbnail quality tier.
//!
//! Thumbnails get a [`DegradeChain`]: the full tier list in resolution order,
//! starting at the configured initial tier. Each load failure moves exactly
//! one step down until the list runs out.

use url::form_urlencoded;

use crate::config::{LinksConfig, SiteConfig};

fn encode(id: &str) -> String {
    form_urlencoded::byte_serialize(id.as_bytes()).collect()
}

fn fill(template: &str, id: &str) -> String {
    template.replace("{id}", &encode(id))
}

pub fn watch_url(links: &LinksConfig, video_id: &str) -> String {
    fill(&links.watch, video_id)
}

pub fn embed_url(links: &LinksConfig, video_id: &str) -> String {
    fill(&links.embed, video_id)
}

pub fn thumbnail_url(links: &LinksConfig, video_id: &str, tier: &str) -> String {
    fill(&links.thumbnail, video_id).replace("{tier}", &encode(tier))
}

pub fn channel_url(links: &LinksConfig, channel_id: &str) -> String {
    fill(&links.channel, channel_id)
}

pub fn download_url(links: &LinksConfig, file_id: &str) -> String {
    fill(&links.download, file_id)
}

pub fn preview_url(links: &LinksConfig, file_id: &str) -> String {
    fill(&links.preview, file_id)
}

pub fn mailto(email: &str) -> String {
    format!("mailto:{}", email.trim())
}

/// Suggested filename for a document download.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`.
pub fn download_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.pdf")
}

/// Thumbnail URLs for every configured tier, highest resolution first.
pub fn thumbnail_urls(config: &SiteConfig, video_id: &str) -> Vec<String> {
    config
        .thumbnails
        .tiers
        .iter()
        .map(|tier| thumbnail_url(&config.links, video_id, tier))
        .collect()
}

/// Ordered fallback sequence of thumbnail URLs of decreasing resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradeChain {
    urls: Vec<String>,
    position: usize,
}

impl DegradeChain {
    /// Chain for `video_id`, positioned at the configured initial tier.
    pub fn for_video(config: &SiteConfig, video_id: &str) -> Self {
        let position = config
            .thumbnails
            .tiers
            .iter()
            .position(|t| *t == config.thumbnails.initial)
            .unwrap_or(0);
        Self {
            urls: thumbnail_urls(config, video_id),
            position,
        }
    }

    /// URL currently requested.
    pub fn current(&self) -> Option<&str> {
        self.urls.get(self.position).map(String::as_str)
    }

    /// Record a load failure of the current URL and return its replacement.
    ///
    /// Returns `None` once the lowest tier has failed; the chain then stays
    /// exhausted.
    pub fn fail(&mut self) -> Option<&str> {
        if self.position < self.urls.len() {
            self.position += 1;
        }
        self.current()
    }

    /// URLs still available after the current one, in the order they are tried.
    pub fn fallbacks(&self) -> &[String] {
        self.urls.get(self.position + 1..).unwrap_or(&[])
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.urls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_use_default_templates() {
        let links = LinksConfig::default();
        assert_eq!(
            watch_url(&links, "X_oUMqtYadc"),
            "https://www.youtube.com/watch?v=X_oUMqtYadc"
        );
        assert_eq!(
            embed_url(&links, "X_oUMqtYadc"),
            "https://www.youtube.com/embed/X_oUMqtYadc"
        );
        assert_eq!(
            thumbnail_url(&links, "abc", "mqdefault"),
            "https://img.youtube.com/vi/abc/mqdefault.jpg"
        );
        assert_eq!(
            download_url(&links, "F1"),
            "https://drive.google.com/uc?export=download&id=F1"
        );
        assert_eq!(
            preview_url(&links, "F1"),
            "https://drive.google.com/file/d/F1/preview"
        );
        assert_eq!(
            channel_url(&links, "UC1"),
            "https://youtube.com/channel/UC1"
        );
    }

    #[test]
    fn identifiers_are_encoded() {
        let links = LinksConfig::default();
        let url = watch_url(&links, "a&b=<c>");
        assert_eq!(url, "https://www.youtube.com/watch?v=a%26b%3D%3Cc%3E");
    }

    #[test]
    fn mailto_prefixes_address() {
        assert_eq!(mailto(" hub@example.com "), "mailto:hub@example.com");
    }

    #[test]
    fn download_filename_replaces_non_alphanumerics() {
        assert_eq!(
            download_filename("Mathematics Paper 1 - 2023"),
            "Mathematics_Paper_1___2023.pdf"
        );
        assert_eq!(download_filename("Física"), "F_sica.pdf");
    }

    #[test]
    fn thumbnail_urls_cover_every_tier_in_order() {
        let config = SiteConfig::default();
        let urls = thumbnail_urls(&config, "abc");
        assert_eq!(urls.len(), 5);
        assert!(urls[0].ends_with("/maxresdefault.jpg"));
        assert!(urls[4].ends_with("/default.jpg"));
    }

    #[test]
    fn chain_starts_at_initial_tier() {
        let chain = DegradeChain::for_video(&SiteConfig::default(), "abc");
        assert_eq!(
            chain.current(),
            Some("https://img.youtube.com/vi/abc/hqdefault.jpg")
        );
        assert_eq!(chain.fallbacks().len(), 2);
    }

    #[test]
    fn one_failure_moves_exactly_one_tier() {
        let mut chain = DegradeChain::for_video(&SiteConfig::default(), "abc");
        assert_eq!(
            chain.fail(),
            Some("https://img.youtube.com/vi/abc/mqdefault.jpg")
        );
        assert_eq!(
            chain.current(),
            Some("https://img.youtube.com/vi/abc/mqdefault.jpg")
        );
    }

    #[test]
    fn chain_runs_to_the_lowest_tier_then_stops() {
        let mut chain = DegradeChain::for_video(&SiteConfig::default(), "abc");
        assert!(chain.fail().is_some());
        assert_eq!(
            chain.fail(),
            Some("https://img.youtube.com/vi/abc/default.jpg")
        );
        assert!(chain.fallbacks().is_empty());
        assert_eq!(chain.fail(), None);
        assert!(chain.is_exhausted());
        assert_eq!(chain.fail(), None);
    }

    #[test]
    fn chain_honours_custom_initial_tier() {
        let mut config = SiteConfig::default();
        config.thumbnails.initial = "maxresdefault".into();
        let chain = DegradeChain::for_video(&config, "abc");
        assert!(chain.current().unwrap().ends_with("/maxresdefault.jpg"));
        assert_eq!(chain.fallbacks().len(), 4);
    }
}
