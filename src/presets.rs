/// A named social-media asset size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

const PRESETS: &[PresetEntry] = &[
    preset("fb_profile", "Facebook Profile", 170, 170),
    preset("fb_cover", "Facebook Cover", 820, 312),
    preset("fb_post_square", "Facebook Post (Square)", 1200, 1200),
    preset("fb_post_landscape", "Facebook Post (Landscape)", 1200, 630),
    preset("ig_profile", "Instagram Profile", 320, 320),
    preset("ig_post_square", "Instagram Post (Square)", 1080, 1080),
    preset("ig_post_portrait", "Instagram Post (Portrait)", 1080, 1350),
    preset("ig_story", "Instagram Story", 1080, 1920),
    preset("x_profile", "X Profile", 400, 400),
    preset("x_header", "X Header", 1500, 500),
    preset("x_post", "X Post", 1200, 675),
    preset("sc_profile", "Snapchat Profile", 320, 320),
    preset("sc_stories", "Snapchat Story", 1080, 1920),
    preset("yt_profile", "YouTube Profile", 800, 800),
    preset("yt_thumbnail", "YouTube Thumbnail", 1280, 720),
    preset("yt_banner", "YouTube Banner", 2560, 1440),
    preset("bs_profile", "Bluesky Profile", 400, 400),
    preset("bs_banner", "Bluesky Banner", 1000, 1500),
    preset("bs_sqr_post", "Bluesky Post (Square)", 1000, 1500),
    preset("bs_ls_post", "Bluesky Post (Landscape)", 1200, 627),
    preset("bs_portrait", "Bluesky Post (Portrait)", 627, 1200),
];

const fn preset(id: &'static str, label: &'static str, width: u32, height: u32) -> PresetEntry {
    PresetEntry {
        id,
        label,
        width,
        height,
    }
}

/// All presets, in display order.
pub fn all() -> &'static [PresetEntry] {
    PRESETS
}

/// Look up a preset by id.
pub fn lookup(id: &str) -> Option<&'static PresetEntry> {
    PRESETS.iter().find(|entry| entry.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_returns_exact_dimensions_for_every_id() {
        for entry in all() {
            let found = lookup(entry.id).unwrap();
            assert_eq!(found.width, entry.width);
            assert_eq!(found.height, entry.height);
        }
    }

    #[test]
    fn lookup_spot_checks() {
        let cover = lookup("fb_cover").unwrap();
        assert_eq!((cover.width, cover.height), (820, 312));

        let story = lookup("ig_story").unwrap();
        assert_eq!((story.width, story.height), (1080, 1920));

        let banner = lookup("yt_banner").unwrap();
        assert_eq!((banner.width, banner.height), (2560, 1440));
    }

    #[test]
    fn lookup_unknown_id_is_absent() {
        assert!(lookup("tiktok_profile").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = all().iter().map(|entry| entry.id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn all_dimensions_are_positive() {
        for entry in all() {
            assert!(entry.width > 0 && entry.height > 0, "{}", entry.id);
        }
    }
}
