use crate::{Session, SessionError};
use domain::{AppCommand, PostDraft, StoreEvent};
use storage::{EditOutcome, NewComment};
use tracing::{debug, info};

fn validate_comment(text: &str, image: Option<&String>) -> Result<(), SessionError> {
    if text.trim().is_empty() && image.is_none() {
        return Err(SessionError::Validation(
            "comment needs text or an attachment".to_string(),
        ));
    }
    Ok(())
}

fn validate_post(draft: &PostDraft) -> Result<(), SessionError> {
    if draft.title.trim().is_empty() || draft.body.trim().is_empty() {
        return Err(SessionError::Validation(
            "post needs a title and a body".to_string(),
        ));
    }
    Ok(())
}

impl Session {
    /// Applies one synchronous command. File reads are issued by the event
    /// loop and never reach this function.
    pub fn apply(&mut self, cmd: AppCommand) -> Result<Vec<StoreEvent>, SessionError> {
        debug!(command = cmd.name(), "applying");
        match cmd {
            AppCommand::Vote { key, direction } => {
                let (votes, user_vote) = self.store.vote(&key, direction);
                Ok(vec![StoreEvent::VoteCast {
                    key,
                    votes,
                    user_vote,
                }])
            }
            AppCommand::AddComment {
                key,
                text,
                image,
                parent_id,
                tags,
            } => self.execute_comment(key, text, image, parent_id, tags),
            AppCommand::SubmitComment { text, image, tags } => {
                let (key, parent_id) = self.comment_target().ok_or_else(|| {
                    SessionError::Validation("no reader is open".to_string())
                })?;
                self.execute_comment(key, text, image, parent_id, tags)
            }
            AppCommand::EditComment {
                key,
                comment_id,
                text,
            } => {
                if text.trim().is_empty() {
                    return Err(SessionError::Validation("edit text is empty".to_string()));
                }
                match self.store.edit_comment(&key, &comment_id, &text)? {
                    EditOutcome::Edited(comment) => Ok(vec![StoreEvent::CommentEdited { key, comment }]),
                    EditOutcome::Unchanged => Ok(vec![]),
                }
            }
            AppCommand::CreatePost { draft } => self.execute_create_post(draft),
            AppCommand::UpdatePost { id, draft } => self.execute_update_post(&id, draft),
            AppCommand::SubmitPost { draft } => {
                let editing = self.nav.post_modal().and_then(|m| m.editing.clone());
                let events = match editing {
                    Some(id) => self.execute_update_post(&id, draft)?,
                    None => self.execute_create_post(draft)?,
                };
                self.nav.close_post_modal();
                Ok(events)
            }
            AppCommand::OpenReader { key } => {
                self.nav.open_reader(key);
                Ok(vec![self.view_changed()])
            }
            AppCommand::OpenSpinOff {
                post_id,
                comment_id,
            } => {
                self.nav.open_spin_off(post_id, comment_id);
                Ok(vec![self.view_changed()])
            }
            AppCommand::CloseSpinOff => {
                let closed = self.nav.close_spin_off();
                debug!(?closed, "modal closed");
                Ok(vec![self.view_changed()])
            }
            AppCommand::ChangeMode { mode } => {
                self.nav.change_mode(mode);
                Ok(vec![self.view_changed()])
            }
            AppCommand::CycleTheme => {
                self.nav.cycle_theme();
                Ok(vec![self.view_changed()])
            }
            AppCommand::OpenPostModal { post_id } => {
                if let Some(id) = post_id.as_deref() {
                    if self.store.post(id).is_none() {
                        return Err(storage::StoreError::PostNotFound(id.to_string()).into());
                    }
                }
                self.nav.open_post_modal(post_id);
                Ok(vec![self.view_changed()])
            }
            AppCommand::ClosePostModal => {
                self.nav.close_post_modal();
                Ok(vec![self.view_changed()])
            }
            AppCommand::ClearAttachment => {
                self.pending.clear();
                Ok(vec![])
            }
            AppCommand::AttachFile { .. } => Err(SessionError::Validation(
                "file reads are issued by the event loop".to_string(),
            )),
        }
    }

    fn execute_comment(
        &mut self,
        key: String,
        text: String,
        image: Option<String>,
        parent_id: Option<String>,
        tags: Vec<String>,
    ) -> Result<Vec<StoreEvent>, SessionError> {
        let from_pending = image.is_none() && self.pending.peek().is_some();
        let image = image.or_else(|| self.pending.peek().map(|a| a.data_uri.clone()));
        validate_comment(&text, image.as_ref())?;

        let comment = self.store.add_comment(
            &key,
            NewComment {
                text,
                image,
                parent_id: parent_id.clone(),
                tags,
            },
        )?;
        // 提交成功且确实用到了暂存附件才清空
        if from_pending {
            self.pending.clear();
        }
        info!(key = %key, id = %comment.id, reply = parent_id.is_some(), "comment saved");

        Ok(vec![StoreEvent::CommentAdded {
            key,
            parent_id,
            comment,
        }])
    }

    fn execute_create_post(&mut self, mut draft: PostDraft) -> Result<Vec<StoreEvent>, SessionError> {
        validate_post(&draft)?;
        if draft.image.is_none() {
            draft.image = self.pending.take_data_uri();
        }
        let post = self.store.create_post(draft);
        info!(id = %post.id, "post created");
        Ok(vec![StoreEvent::PostCreated { post }])
    }

    fn execute_update_post(&mut self, id: &str, mut draft: PostDraft) -> Result<Vec<StoreEvent>, SessionError> {
        validate_post(&draft)?;
        let from_pending = draft.image.is_none() && self.pending.peek().is_some();
        if from_pending {
            draft.image = self.pending.peek().map(|a| a.data_uri.clone());
        }
        let post = self.store.update_post(id, draft)?;
        if from_pending {
            self.pending.clear();
        }
        info!(id = %post.id, revisions = post.edit_history.len(), "post updated");
        Ok(vec![StoreEvent::PostUpdated { post }])
    }

    pub(crate) fn view_changed(&self) -> StoreEvent {
        StoreEvent::ViewChanged {
            mode: self.nav.mode,
            theme: self.nav.theme().to_string(),
            reader: self.nav.reader().map(str::to_string),
            spin_off: self
                .nav
                .spin_off()
                .map(|t| (t.post_id.clone(), t.comment_id.clone())),
            post_modal_open: self.nav.post_modal().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::PendingAttachment;
    use domain::Vote;
    use storage::{Store, StoreConfig, StoreError};

    fn session() -> Session {
        Session::new(Store::seeded(&StoreConfig {
            rng_seed: Some(42),
            ..Default::default()
        }))
    }

    fn add(key: &str, text: &str, parent: Option<&str>) -> AppCommand {
        AppCommand::AddComment {
            key: key.to_string(),
            text: text.to_string(),
            image: None,
            parent_id: parent.map(str::to_string),
            tags: vec![],
        }
    }

    fn draft(title: &str, body: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            body: body.to_string(),
            category: "Club".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_submissions_are_rejected_before_the_store() {
        let mut s = session();
        let before = s.store.comments("FAQ").len();
        let err = s.apply(add("FAQ", "   \n", None)).unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
        assert_eq!(s.store.comments("FAQ").len(), before);

        let posts = s.store.posts().len();
        assert!(s.apply(AppCommand::CreatePost { draft: draft("t", " ") }).is_err());
        assert_eq!(s.store.posts().len(), posts);
    }

    #[test]
    fn test_pending_attachment_rides_along_with_submit() {
        let mut s = session();
        s.pending.set(PendingAttachment {
            mime: "image/png".to_string(),
            bytes: 3,
            data_uri: "data:image/png;base64,AAAA".to_string(),
        });

        let events = s.apply(add("Arts", "", None)).unwrap();
        let StoreEvent::CommentAdded { comment, .. } = &events[0] else {
            panic!("unexpected {:?}", events);
        };
        assert_eq!(comment.image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(s.pending.peek().is_none());
    }

    fn png() -> PendingAttachment {
        PendingAttachment {
            mime: "image/png".to_string(),
            bytes: 3,
            data_uri: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn test_explicit_image_leaves_pending_staged() {
        let mut s = session();
        s.pending.set(png());
        let mut cmd = add("Arts", "linked", None);
        if let AppCommand::AddComment { image, .. } = &mut cmd {
            *image = Some("https://picsum.photos/seed/x/10/10".to_string());
        }
        let events = s.apply(cmd).unwrap();
        let StoreEvent::CommentAdded { comment, .. } = &events[0] else {
            panic!("unexpected {:?}", events);
        };
        assert_eq!(comment.image.as_deref(), Some("https://picsum.photos/seed/x/10/10"));
        assert_eq!(s.pending.peek(), Some(&png()));
    }

    #[test]
    fn test_post_edit_consumes_pending_attachment() {
        let mut s = session();
        s.apply(AppCommand::OpenPostModal { post_id: Some("post-mock-1".to_string()) }).unwrap();
        s.pending.set(png());

        let events = s.apply(AppCommand::SubmitPost { draft: draft("Future", "new body") }).unwrap();
        let StoreEvent::PostUpdated { post } = &events[0] else {
            panic!("unexpected {:?}", events);
        };
        assert_eq!(post.image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(s.pending.peek().is_none());

        let events = s.apply(add("FAQ", "unrelated", None)).unwrap();
        let StoreEvent::CommentAdded { comment, .. } = &events[0] else {
            panic!("unexpected {:?}", events);
        };
        assert!(comment.image.is_none());
    }

    #[test]
    fn test_failed_post_edit_keeps_pending() {
        let mut s = session();
        s.pending.set(png());
        let err = s
            .apply(AppCommand::UpdatePost { id: "post-0".to_string(), draft: draft("t", "b") })
            .unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::PostNotFound(_))));
        assert!(s.pending.peek().is_some());
    }

    #[test]
    fn test_failed_reply_keeps_pending_and_tree() {
        let mut s = session();
        s.pending.set(PendingAttachment {
            mime: "application/pdf".to_string(),
            bytes: 1,
            data_uri: "data:application/pdf;base64,AA==".to_string(),
        });
        let before = s.store.comments("post-mock-1");
        let err = s.apply(add("post-mock-1", "hi", Some("nonexistent-id"))).unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::CommentNotFound { .. })));
        assert_eq!(s.store.comments("post-mock-1"), before);
        assert!(s.pending.peek().is_some());
    }

    #[test]
    fn test_submit_in_spin_off_replies_to_root_comment() {
        let mut s = session();
        s.apply(AppCommand::OpenReader { key: "post-mock-1".to_string() }).unwrap();
        s.apply(AppCommand::OpenSpinOff {
            post_id: "post-mock-1".to_string(),
            comment_id: "c-mock-1".to_string(),
        })
        .unwrap();

        s.apply(AppCommand::SubmitComment {
            text: "into the thread".to_string(),
            image: None,
            tags: vec!["nsfw".to_string()],
        })
        .unwrap();

        let view = s.reader_view().unwrap();
        assert!(view.is_thread);
        assert_eq!(view.title, "Thread by @latent_explorer");
        assert_eq!(view.comments.len(), 2);
        assert_eq!(view.comments[1].text, "into the thread");
        assert!(s.store.thread_stats("post-mock-1", "c-mock-1").unwrap().has_hazard);

        s.apply(AppCommand::CloseSpinOff).unwrap();
        let view = s.reader_view().unwrap();
        assert!(!view.is_thread);
        assert_eq!(view.title, "Future of Latent Interfaces");

        s.apply(AppCommand::CloseSpinOff).unwrap();
        assert!(s.reader_view().is_none());
        assert!(s.apply(AppCommand::SubmitComment { text: "x".into(), image: None, tags: vec![] }).is_err());
    }

    #[test]
    fn test_reader_resolves_post_title_to_its_id() {
        let mut s = session();
        s.apply(AppCommand::OpenReader { key: "LoRA Training Tips".to_string() }).unwrap();
        assert_eq!(
            s.comment_target(),
            Some(("post-mock-4".to_string(), None))
        );
        let view = s.reader_view().unwrap();
        assert_eq!(view.comments[0].text, "Lower LR by 10x.");

        s.apply(AppCommand::OpenReader { key: "Nowhere".to_string() }).unwrap();
        assert_eq!(s.reader_view().unwrap().body, "Content not found.");
    }

    #[test]
    fn test_hazard_post_is_gated_in_reader() {
        let mut s = session();
        let mut d = draft("spooky", "body");
        d.tags = vec!["dark_arts".to_string()];
        let events = s.apply(AppCommand::CreatePost { draft: d }).unwrap();
        let StoreEvent::PostCreated { post } = &events[0] else {
            panic!("unexpected {:?}", events);
        };

        s.apply(AppCommand::OpenReader { key: post.id.clone() }).unwrap();
        let mut view = s.reader_view().unwrap();
        assert!(view.gate.obscured());
        view.gate.reveal();
        assert!(!view.gate.obscured());
        assert!(s.reader_view().unwrap().gate.obscured());
    }

    #[test]
    fn test_submit_post_creates_then_edits() {
        let mut s = session();
        s.apply(AppCommand::OpenPostModal { post_id: None }).unwrap();
        let events = s.apply(AppCommand::SubmitPost { draft: draft("new", "first body") }).unwrap();
        let StoreEvent::PostCreated { post } = &events[0] else {
            panic!("unexpected {:?}", events);
        };
        assert!(s.nav.post_modal().is_none());
        let i = s.store.interaction(&post.id).unwrap();
        assert_eq!((i.votes, i.user_vote), (1, Vote::Up));

        s.apply(AppCommand::OpenPostModal { post_id: Some(post.id.clone()) }).unwrap();
        let events = s.apply(AppCommand::SubmitPost { draft: draft("new", "second body") }).unwrap();
        assert!(matches!(&events[0], StoreEvent::PostUpdated { post } if post.edit_history.len() == 1));

        assert!(s.apply(AppCommand::OpenPostModal { post_id: Some("post-0".into()) }).is_err());
    }

    #[test]
    fn test_edit_without_change_emits_nothing() {
        let mut s = session();
        let cmd = AppCommand::EditComment {
            key: "post-mock-4".to_string(),
            comment_id: "c-mock-2".to_string(),
            text: "Lower LR by 10x.".to_string(),
        };
        assert!(s.apply(cmd).unwrap().is_empty());

        let cmd = AppCommand::EditComment {
            key: "post-mock-4".to_string(),
            comment_id: "c-mock-2".to_string(),
            text: "Lower LR by 100x.".to_string(),
        };
        assert_eq!(s.apply(cmd).unwrap().len(), 1);
        let revs = s.store.comment_revisions("post-mock-4", "c-mock-2").unwrap();
        assert_eq!(revs.len(), 2);
    }
}
