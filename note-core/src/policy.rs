//! Which action buttons are usable for a given note length.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SHARE_LEN: usize = 2000;

/// The four action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlId {
    CopyText,
    CopyLink,
    GenerateImage,
    SaveFile,
}

impl ControlId {
    pub const ALL: [ControlId; 4] = [
        ControlId::CopyText,
        ControlId::CopyLink,
        ControlId::GenerateImage,
        ControlId::SaveFile,
    ];

    /// Actions whose payload is a share link and therefore bounded in size.
    pub fn embeds_link(self) -> bool {
        matches!(self, ControlId::CopyLink | ControlId::GenerateImage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnablementPolicy {
    pub max_share_len: usize,
}

impl Default for EnablementPolicy {
    fn default() -> Self {
        Self {
            max_share_len: DEFAULT_MAX_SHARE_LEN,
        }
    }
}

impl EnablementPolicy {
    pub fn new(max_share_len: usize) -> Self {
        Self { max_share_len }
    }

    pub fn is_enabled(&self, control: ControlId, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        if control.embeds_link() {
            return len <= self.max_share_len;
        }
        true
    }

    pub fn evaluate(&self, len: usize) -> Enablement {
        Enablement {
            copy_text: self.is_enabled(ControlId::CopyText, len),
            copy_link: self.is_enabled(ControlId::CopyLink, len),
            generate_image: self.is_enabled(ControlId::GenerateImage, len),
            save_file: self.is_enabled(ControlId::SaveFile, len),
        }
    }
}

/// Snapshot of the policy for one text length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Enablement {
    pub copy_text: bool,
    pub copy_link: bool,
    pub generate_image: bool,
    pub save_file: bool,
}

impl Enablement {
    pub fn get(&self, control: ControlId) -> bool {
        match control {
            ControlId::CopyText => self.copy_text,
            ControlId::CopyLink => self.copy_link,
            ControlId::GenerateImage => self.generate_image,
            ControlId::SaveFile => self.save_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_disables_everything() {
        assert_eq!(EnablementPolicy::default().evaluate(0), Enablement::default());
    }

    #[test]
    fn single_char_enables_everything() {
        let e = EnablementPolicy::default().evaluate(1);
        assert!(e.copy_text && e.copy_link && e.generate_image && e.save_file);
    }

    #[test]
    fn ceiling_is_inclusive() {
        let e = EnablementPolicy::default().evaluate(2000);
        assert!(e.copy_link);
        assert!(e.generate_image);
    }

    #[test]
    fn past_ceiling_only_link_actions_disable() {
        let e = EnablementPolicy::default().evaluate(2001);
        assert!(!e.copy_link);
        assert!(!e.generate_image);
        assert!(e.copy_text);
        assert!(e.save_file);
    }

    #[test]
    fn custom_ceiling() {
        let policy = EnablementPolicy::new(5);
        assert!(policy.is_enabled(ControlId::CopyLink, 5));
        assert!(!policy.is_enabled(ControlId::CopyLink, 6));
        assert!(policy.is_enabled(ControlId::SaveFile, 6));
    }
}
