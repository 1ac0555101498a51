use crate::models::{PostDraft, Vote};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceMode {
    Zui,
    Classic,
    #[default]
    Web2,
}

/// A discrete user action, applied in arrival order by the session loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppCommand {
    Vote {
        key: String,
        direction: Vote,
    },
    AddComment {
        key: String,
        text: String,
        #[serde(default)]
        image: Option<String>,
        #[serde(default)]
        parent_id: Option<String>,
        #[serde(default)]
        tags: Vec<String>,
    },
    /// Comment on whatever the reader shows; a reply when a spin-off is open.
    SubmitComment {
        text: String,
        #[serde(default)]
        image: Option<String>,
        #[serde(default)]
        tags: Vec<String>,
    },
    EditComment {
        key: String,
        comment_id: String,
        text: String,
    },
    CreatePost {
        draft: PostDraft,
    },
    UpdatePost {
        id: String,
        draft: PostDraft,
    },
    /// Create or update depending on which post the modal was opened for.
    SubmitPost {
        draft: PostDraft,
    },
    OpenReader {
        key: String,
    },
    OpenSpinOff {
        post_id: String,
        comment_id: String,
    },
    CloseSpinOff,
    ChangeMode {
        mode: InterfaceMode,
    },
    CycleTheme,
    OpenPostModal {
        #[serde(default)]
        post_id: Option<String>,
    },
    ClosePostModal,
    AttachFile {
        path: String,
    },
    ClearAttachment,
}

impl AppCommand {
    pub fn name(&self) -> &'static str {
        match self {
            AppCommand::Vote { .. } => "vote",
            AppCommand::AddComment { .. } => "add_comment",
            AppCommand::SubmitComment { .. } => "submit_comment",
            AppCommand::EditComment { .. } => "edit_comment",
            AppCommand::CreatePost { .. } => "create_post",
            AppCommand::UpdatePost { .. } => "update_post",
            AppCommand::SubmitPost { .. } => "submit_post",
            AppCommand::OpenReader { .. } => "open_reader",
            AppCommand::OpenSpinOff { .. } => "open_spin_off",
            AppCommand::CloseSpinOff => "close_spin_off",
            AppCommand::ChangeMode { .. } => "change_mode",
            AppCommand::CycleTheme => "cycle_theme",
            AppCommand::OpenPostModal { .. } => "open_post_modal",
            AppCommand::ClosePostModal => "close_post_modal",
            AppCommand::AttachFile { .. } => "attach_file",
            AppCommand::ClearAttachment => "clear_attachment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_line() {
        let cmd: AppCommand =
            serde_json::from_str(r#"{"type":"vote","key":"Charter","direction":-1}"#).unwrap();
        assert_eq!(
            cmd,
            AppCommand::Vote {
                key: "Charter".to_string(),
                direction: Vote::Down
            }
        );

        let cmd: AppCommand =
            serde_json::from_str(r#"{"type":"add_comment","key":"FAQ","text":"hi"}"#).unwrap();
        assert_eq!(cmd.name(), "add_comment");

        let cmd: AppCommand = serde_json::from_str(r#"{"type":"close_spin_off"}"#).unwrap();
        assert_eq!(cmd, AppCommand::CloseSpinOff);
    }
}
