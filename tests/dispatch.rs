//! Integration tests for the dispatch pipeline: welcome transition,
//! handler precedence, and the authorization gate.

mod common;

use common::{StubHandler, calls, connection, privmsg, privmsg_no_prefix, registry, welcome};
use slircb::handlers::Dispatcher;
use slircb_proto::Message;
use std::sync::Arc;

#[tokio::test]
async fn welcome_joins_each_configured_channel_once() {
    let (reg, _dir) = registry(&[]);
    let mut dispatcher = Dispatcher::new(vec!["#a".to_string(), "#b".to_string()], reg);
    let (conn, mut rx) = connection();

    let handled = dispatcher.dispatch(&conn, &welcome()).await.unwrap();
    assert!(!handled, "welcome itself is reported as not handled");

    let first = rx.try_recv().expect("first join");
    let second = rx.try_recv().expect("second join");
    assert_eq!(first.to_string(), "JOIN #a");
    assert_eq!(second.to_string(), "JOIN #b");
    assert!(rx.try_recv().is_err(), "no duplicate joins");
}

#[tokio::test]
async fn duplicate_welcome_does_not_rejoin() {
    let (reg, _dir) = registry(&[]);
    let mut dispatcher = Dispatcher::new(vec!["#a".to_string()], reg);
    let (conn, mut rx) = connection();

    dispatcher.dispatch(&conn, &welcome()).await.unwrap();
    rx.try_recv().expect("join");

    dispatcher.dispatch(&conn, &welcome()).await.unwrap();
    assert!(rx.try_recv().is_err(), "transition fires exactly once");
}

#[tokio::test]
async fn non_privmsg_bypasses_handlers() {
    let (reg, _dir) = registry(&[]);
    let mut dispatcher = Dispatcher::new(vec![], reg);
    let (factoids, factoid_calls) = StubHandler::new("factoids", true);
    dispatcher.register(factoids);
    let (conn, _rx) = connection();

    let topic: Message = ":nick!user@host TOPIC #chan :new topic".parse().unwrap();
    let handled = dispatcher.dispatch(&conn, &topic).await.unwrap();

    assert!(!handled);
    assert_eq!(calls(&factoid_calls), 0);
}

#[tokio::test]
async fn first_accepting_handler_stops_the_chain() {
    let (reg, _dir) = registry(&[]);
    let mut dispatcher = Dispatcher::new(vec![], reg);
    let (factoids, factoid_calls) = StubHandler::new("factoids", true);
    let (analyzer, analyzer_calls) = StubHandler::new("analyzer", true);
    dispatcher.register(factoids);
    dispatcher.register(analyzer);
    let (conn, _rx) = connection();

    let handled = dispatcher
        .dispatch(&conn, &privmsg("someone.example.org", "hello"))
        .await
        .unwrap();

    assert!(handled);
    assert_eq!(calls(&factoid_calls), 1);
    assert_eq!(
        calls(&analyzer_calls),
        0,
        "analyzer must never run once factoids handled the message"
    );
}

#[tokio::test]
async fn declined_message_reaches_later_handlers() {
    let (reg, _dir) = registry(&[]);
    let mut dispatcher = Dispatcher::new(vec![], reg);
    let (factoids, factoid_calls) = StubHandler::new("factoids", false);
    let (analyzer, analyzer_calls) = StubHandler::new("analyzer", true);
    dispatcher.register(factoids);
    dispatcher.register(analyzer);
    let (conn, _rx) = connection();

    let handled = dispatcher
        .dispatch(&conn, &privmsg("someone.example.org", "hello"))
        .await
        .unwrap();

    assert!(handled);
    assert_eq!(calls(&factoid_calls), 1);
    assert_eq!(calls(&analyzer_calls), 1);
}

#[tokio::test]
async fn missing_host_stops_before_the_gate() {
    let (reg, _dir) = registry(&[]);
    let mut dispatcher = Dispatcher::new(vec![], Arc::clone(&reg));
    let (conn, mut rx) = connection();

    let handled = dispatcher
        .dispatch(&conn, &privmsg_no_prefix(".addadmin evil.example"))
        .await
        .unwrap();

    assert!(!handled, "nothing left to do without a sender host");
    assert!(!reg.is_authorized("evil.example"));
    assert!(rx.try_recv().is_err(), "no response of any kind");
}

#[tokio::test]
async fn unauthorized_host_is_dropped_silently() {
    let (reg, _dir) = registry(&["alice.example.org"]);
    let mut dispatcher = Dispatcher::new(vec![], Arc::clone(&reg));
    let (admin_stub, admin_calls) = StubHandler::new("factoids-admin", true);
    dispatcher.register_admin(admin_stub);
    let (conn, mut rx) = connection();

    let handled = dispatcher
        .dispatch(&conn, &privmsg("mallory.example.org", ".addadmin evil.example"))
        .await
        .unwrap();

    assert!(handled, "the pipeline consumed the message");
    assert!(!reg.is_authorized("evil.example"), "set never mutated");
    assert_eq!(calls(&admin_calls), 0, "privileged chain never ran");
    assert!(rx.try_recv().is_err(), "silence, no unauthorized notice");
}

#[tokio::test]
async fn unauthenticated_handlers_get_first_refusal_even_for_admins() {
    let (reg, _dir) = registry(&["alice.example.org"]);
    let mut dispatcher = Dispatcher::new(vec![], Arc::clone(&reg));
    let (factoids, factoid_calls) = StubHandler::new("factoids", true);
    dispatcher.register(factoids);
    let (conn, mut rx) = connection();

    // An admin's message that factoids claims never reaches the executor.
    let handled = dispatcher
        .dispatch(&conn, &privmsg("alice.example.org", ".addadmin new.example.org"))
        .await
        .unwrap();

    assert!(handled);
    assert_eq!(calls(&factoid_calls), 1);
    assert!(!reg.is_authorized("new.example.org"));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn admin_chain_runs_in_order_with_executor_last() {
    let (reg, _dir) = registry(&["alice.example.org"]);
    let mut dispatcher = Dispatcher::new(vec![], Arc::clone(&reg));
    let (admin_stub, admin_calls) = StubHandler::new("factoids-admin", true);
    dispatcher.register_admin(admin_stub);
    let (conn, mut rx) = connection();

    let handled = dispatcher
        .dispatch(&conn, &privmsg("alice.example.org", ".addadmin new.example.org"))
        .await
        .unwrap();

    assert!(handled);
    assert_eq!(calls(&admin_calls), 1);
    // The stub claimed it first, so the executor never mutated anything.
    assert!(!reg.is_authorized("new.example.org"));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn authorized_non_command_text_falls_through() {
    let (reg, _dir) = registry(&["alice.example.org"]);
    let mut dispatcher = Dispatcher::new(vec![], reg);
    let (conn, mut rx) = connection();

    let handled = dispatcher
        .dispatch(&conn, &privmsg("alice.example.org", "just chatting"))
        .await
        .unwrap();

    assert!(!handled, "nothing claimed it");
    assert!(rx.try_recv().is_err());
}
