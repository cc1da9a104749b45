use std::collections::HashSet;
use std::sync::Arc;

use campus_share_api::{
    AccountKind, AccountSummary, ConversationSummary, ThreadMessage, ThreadResponse,
};
use uuid::Uuid;

use super::non_blank;
use crate::db::models::message::NewMessage;
use crate::db::store::Store;
use crate::error::AppError;

const SEARCH_LIMIT: i64 = 10;

/// Messagerie un-à-un entre employés.
pub struct ConversationService {
    store: Arc<dyn Store>,
}

impl ConversationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Un résumé par interlocuteur, la conversation la plus récente d'abord
    pub fn list_conversations(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, AppError> {
        let messages = self.store.list_messages_involving(account_id)?;

        // Parcours du plus récent au plus ancien: la première occurrence gagne
        let mut seen = HashSet::new();
        let summaries = messages
            .iter()
            .filter_map(|msg| {
                let (user_id, name, email) = msg.counterpart(account_id);
                seen.insert(user_id).then(|| ConversationSummary {
                    user_id,
                    name: name.to_string(),
                    email: email.to_string(),
                    last_message: msg.text.clone(),
                    last_message_time: msg.timestamp,
                    unread: msg.is_unread_for(account_id),
                })
            })
            .collect();

        Ok(summaries)
    }

    /// Fil complet avec l'employé `other_email`, du plus ancien au plus récent.
    /// Les messages reçus sont marqués lus; les drapeaux retournés sont ceux
    /// d'avant la lecture.
    pub fn get_thread(
        &self,
        account_id: Uuid,
        other_email: &str,
    ) -> Result<ThreadResponse, AppError> {
        let other = self
            .store
            .find_account_by_email(other_email, AccountKind::Employee)?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let messages = self
            .store
            .list_thread(account_id, other.id)?
            .into_iter()
            .map(|msg| {
                let is_mine = msg.sender_id == account_id;
                ThreadMessage {
                    id: msg.id,
                    sender: if is_mine {
                        "You".to_string()
                    } else {
                        msg.sender_name
                    },
                    text: msg.text,
                    sender_email: msg.sender_email,
                    timestamp: msg.timestamp,
                    is_mine,
                    read: msg.read,
                }
            })
            .collect();

        let marked = self.store.mark_thread_read(account_id, other.id)?;
        if marked > 0 {
            tracing::debug!(%account_id, sender_id = %other.id, marked, "Messages marked read");
        }

        Ok(ThreadResponse {
            other_user: other.summary(),
            messages,
        })
    }

    pub fn send_message(
        &self,
        sender_id: Uuid,
        receiver_email: Option<String>,
        text: Option<String>,
    ) -> Result<ThreadMessage, AppError> {
        let (Some(receiver_email), Some(text)) = (non_blank(receiver_email), non_blank(text))
        else {
            return Err(AppError::validation(
                "Receiver email and message text are required",
            ));
        };

        let receiver = self
            .store
            .find_account_by_email(&receiver_email, AccountKind::Employee)?
            .ok_or_else(|| AppError::not_found("Receiver not found"))?;
        if receiver.id == sender_id {
            return Err(AppError::SelfMessage);
        }

        let sender = self
            .store
            .find_account(sender_id)?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let message = self.store.insert_message(&NewMessage {
            sender_id: sender.id,
            sender_email: sender.email,
            sender_name: sender.name,
            receiver_id: receiver.id,
            receiver_email: receiver.email,
            receiver_name: receiver.name,
            text,
        })?;

        Ok(ThreadMessage {
            id: message.id,
            text: message.text,
            sender: "You".to_string(),
            sender_email: message.sender_email,
            timestamp: message.timestamp,
            is_mine: true,
            read: message.read,
        })
    }

    /// Recherche (insensible à la casse) dans les emails des employés, appelant exclu
    pub fn search_accounts(
        &self,
        caller_id: Uuid,
        fragment: Option<String>,
    ) -> Result<Vec<AccountSummary>, AppError> {
        let fragment = non_blank(fragment)
            .ok_or_else(|| AppError::validation("Email query parameter is required"))?;

        Ok(self
            .store
            .search_accounts(fragment.trim(), AccountKind::Employee, caller_id, SEARCH_LIMIT)?
            .iter()
            .map(|account| account.summary())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::account::Account;
    use crate::services::fixtures;

    fn send(service: &ConversationService, from: &Account, to: &Account, text: &str) {
        service
            .send_message(from.id, Some(to.email.clone()), Some(text.to_string()))
            .expect("send message");
    }

    #[test]
    fn one_summary_per_counterpart_holding_the_newest_message() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        let ben = fixtures::employee(&store, "Ben");
        let cleo = fixtures::employee(&store, "Cleo");
        let service = ConversationService::new(store);

        send(&service, &ana, &ben, "Is the projector free?");
        send(&service, &cleo, &ana, "Lunch?");
        send(&service, &ben, &ana, "Yes, Friday works");
        send(&service, &ana, &ben, "Great, thanks");

        let summaries = service.list_conversations(ana.id).unwrap();
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].user_id, ben.id);
        assert_eq!(summaries[0].last_message, "Great, thanks");
        assert!(!summaries[0].unread, "newest message was sent by the caller");

        assert_eq!(summaries[1].user_id, cleo.id);
        assert_eq!(summaries[1].email, "cleo@campus.edu");
        assert_eq!(summaries[1].last_message, "Lunch?");
        assert!(summaries[1].unread);
    }

    #[test]
    fn reading_a_thread_clears_its_unread_flag() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        let ben = fixtures::employee(&store, "Ben");
        let service = ConversationService::new(store);

        for text in ["t1", "t2", "t3"] {
            send(&service, &ana, &ben, text);
        }
        assert!(service.list_conversations(ben.id).unwrap()[0].unread);

        let thread = service.get_thread(ben.id, "ana@campus.edu").unwrap();
        let texts: Vec<_> = thread.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["t1", "t2", "t3"]);
        assert!(thread.messages.iter().all(|m| !m.is_mine && !m.read));
        assert_eq!(thread.messages[0].sender, "Ana");
        assert_eq!(thread.other_user.id, ana.id);

        let summaries = service.list_conversations(ben.id).unwrap();
        assert_eq!(summaries.len(), 1);
        assert!(!summaries[0].unread);

        let again = service.get_thread(ben.id, "ana@campus.edu").unwrap();
        assert!(again.messages.iter().all(|m| m.read));
    }

    #[test]
    fn reading_a_thread_leaves_outgoing_messages_unread() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        let ben = fixtures::employee(&store, "Ben");
        let service = ConversationService::new(store);
        send(&service, &ana, &ben, "ping");

        let thread = service.get_thread(ana.id, "ben@campus.edu").unwrap();
        assert!(thread.messages[0].is_mine);
        assert_eq!(thread.messages[0].sender, "You");

        assert!(service.list_conversations(ben.id).unwrap()[0].unread);
    }

    #[test]
    fn thread_with_unknown_email_is_not_found() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        let service = ConversationService::new(store);

        assert!(matches!(
            service.get_thread(ana.id, "ghost@campus.edu").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn messaging_oneself_or_a_stranger_fails() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        let service = ConversationService::new(store);

        let to_self = service
            .send_message(ana.id, Some(ana.email.clone()), Some("hi".to_string()))
            .unwrap_err();
        assert!(matches!(to_self, AppError::SelfMessage));

        let to_stranger = service
            .send_message(ana.id, Some("ghost@campus.edu".to_string()), Some("hi".to_string()))
            .unwrap_err();
        assert!(matches!(to_stranger, AppError::NotFound(ref msg) if msg == "Receiver not found"));
    }

    #[test]
    fn blank_message_is_rejected() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        let ben = fixtures::employee(&store, "Ben");
        let service = ConversationService::new(store);

        let err = service
            .send_message(ana.id, Some(ben.email.clone()), Some("  ".to_string()))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn admins_are_not_reachable_by_messaging() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        fixtures::account(&store, "Root", "root@campus.edu", AccountKind::Admin);
        let service = ConversationService::new(store);

        let err = service
            .send_message(ana.id, Some("root@campus.edu".to_string()), Some("hi".to_string()))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn search_is_case_insensitive_literal_and_excludes_the_caller() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        fixtures::employee(&store, "Anabel");
        fixtures::account(&store, "Dan", "dan.x@campus.edu", AccountKind::Employee);
        fixtures::account(&store, "Root", "anarchy@campus.edu", AccountKind::Admin);
        let service = ConversationService::new(store);

        let found = service.search_accounts(ana.id, Some("ANA".to_string())).unwrap();
        let emails: Vec<_> = found.iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails, ["anabel@campus.edu"]);

        // "." is matched literally, not as a wildcard
        let dotted = service.search_accounts(ana.id, Some("a.a".to_string())).unwrap();
        assert!(dotted.is_empty());
    }

    #[test]
    fn search_caps_results_at_ten() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        for i in 0..12 {
            fixtures::employee(&store, &format!("Tester{i}"));
        }
        let service = ConversationService::new(store);

        let found = service.search_accounts(ana.id, Some("tester".to_string())).unwrap();
        assert_eq!(found.len(), 10);
    }

    #[test]
    fn search_requires_a_fragment() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        let service = ConversationService::new(store);

        assert!(matches!(
            service.search_accounts(ana.id, None).unwrap_err(),
            AppError::Validation(_)
        ));
    }
}
