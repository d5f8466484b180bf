mod common;

use common::{Call, MockHost, at, coffee, config, invoice};
use hoadon_engine::{
    AttemptOutcome, ChainStep, DispatchState, OutputFormat, PrintChain, PrintDispatcher,
    PrintError, ReceiptEngine, TextRenderer,
};
use hoadon_printer::{ChannelError, RawBtTextChannel};
use shared::AppSettings;

fn engine() -> ReceiptEngine {
    ReceiptEngine::new(config(), AppSettings::default())
}

#[test]
fn test_primary_handoff_carries_escpos() {
    let host = MockHost::android();
    let delivery = engine().print(&host, &coffee(), at(19, 45)).unwrap();

    assert_eq!(delivery.channel, "rawbt-base64");
    assert_eq!(delivery.format, OutputFormat::Escpos);
    assert!(!delivery.fell_back());
    assert_eq!(host.calls().len(), 1);
    assert_eq!(host.opened_with("rawbt:base64,"), 1);
}

#[test]
fn test_primary_failure_moves_to_text_without_retry() {
    let host = MockHost {
        refuse_prefixes: vec!["rawbt:base64,"],
        ..MockHost::android()
    };
    let delivery = engine().print(&host, &coffee(), at(19, 45)).unwrap();

    assert_eq!(delivery.channel, "rawbt-text");
    assert!(delivery.fell_back());
    assert!(matches!(
        delivery.attempts[0].outcome,
        AttemptOutcome::ChannelFailed(ChannelError::Refused(_))
    ));

    // primary invoked exactly once, then the text handoff
    let calls = host.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[0], Call::Open(uri) if uri.starts_with("rawbt:base64,")));
    assert!(matches!(&calls[1], Call::Open(uri) if !uri.starts_with("rawbt:base64,")));
    assert!(host.presented().is_empty());
}

#[test]
fn test_no_handoff_platform_uses_print_surface() {
    let host = MockHost::desktop();
    let delivery = engine().print(&host, &coffee(), at(19, 45)).unwrap();

    assert_eq!(delivery.channel, "print-surface");
    assert_eq!(delivery.format, OutputFormat::Markup);
    assert_eq!(host.opened_with("rawbt:"), 0);
    assert_eq!(host.calls().last(), Some(&Call::Print));

    let outcomes: Vec<_> = delivery.attempts.iter().map(|a| &a.outcome).collect();
    assert!(matches!(
        outcomes[..],
        [
            AttemptOutcome::Skipped,
            AttemptOutcome::Skipped,
            AttemptOutcome::Delivered
        ]
    ));
}

#[test]
fn test_both_handoffs_fail_then_surface() {
    let host = MockHost {
        refuse_prefixes: vec!["rawbt:"],
        ..MockHost::android()
    };
    let delivery = engine().print(&host, &coffee(), at(19, 45)).unwrap();

    assert_eq!(delivery.channel, "print-surface");
    assert_eq!(host.opened_with("rawbt:"), 2);
    assert_eq!(host.presented().len(), 1);
}

#[test]
fn test_everything_fails_is_exhausted_once() {
    let host = MockHost {
        refuse_prefixes: vec!["rawbt:"],
        refuse_present: true,
        ..MockHost::android()
    };
    let err = engine().print(&host, &coffee(), at(19, 45)).unwrap_err();

    let attempts = match err {
        PrintError::Exhausted { attempts } => attempts,
        other => panic!("expected exhausted, got {:?}", other),
    };
    let channels: Vec<_> = attempts.iter().map(|a| a.channel).collect();
    assert_eq!(channels, ["rawbt-base64", "rawbt-text", "print-surface"]);
    assert!(
        attempts
            .iter()
            .all(|a| matches!(a.outcome, AttemptOutcome::ChannelFailed(_)))
    );

    // each channel invoked once; the surface never reached its print action
    assert_eq!(host.calls().len(), 3);
    assert!(!host.calls().contains(&Call::Print));
}

#[test]
fn test_empty_order_touches_no_channel() {
    let host = MockHost::android();
    let err = engine().print(&host, &invoice(vec![]), at(19, 45)).unwrap_err();
    assert!(matches!(err, PrintError::EmptyOrder));
    assert!(host.calls().is_empty());
}

#[test]
fn test_print_stamps_check_out_time() {
    let host = MockHost::desktop();
    let original = coffee();
    engine().print(&host, &original, at(21, 5)).unwrap();

    let document = &host.presented()[0];
    assert!(document.contains("Giờ ra: 21:05"));
    assert!(document.contains("Giờ vào: 18:30"));
    // caller's invoice is left alone
    assert_eq!(original.info.check_out_time, "18:30");
}

#[test]
fn test_print_via_surface_skips_handoff() {
    let host = MockHost::android();
    let delivery = engine()
        .print_via_surface(&host, &coffee(), at(19, 45))
        .unwrap();

    assert_eq!(delivery.channel, "print-surface");
    assert_eq!(delivery.attempts.len(), 1);
    assert_eq!(host.opened_with("rawbt:"), 0);
    assert_eq!(host.presented().len(), 1);
}

#[test]
fn test_custom_chain() {
    let mut chain = PrintChain::new();
    chain.push(ChainStep::new(Box::new(TextRenderer::new()), Box::new(RawBtTextChannel)).unwrap());

    let host = MockHost::android();
    let delivery = engine()
        .print_with(chain, &host, &coffee(), at(19, 45))
        .unwrap();
    assert_eq!(delivery.channel, "rawbt-text");
    assert_eq!(host.opened_with("rawbt:"), 1);
}

#[test]
fn test_dispatcher_state_after_fallback() {
    let host = MockHost {
        refuse_prefixes: vec!["rawbt:base64,"],
        ..MockHost::android()
    };
    let mut dispatcher = PrintDispatcher::new(PrintChain::standard(&config()));
    assert_eq!(dispatcher.state(), DispatchState::Idle);

    dispatcher
        .dispatch(&host, &coffee(), &AppSettings::default())
        .unwrap();
    assert_eq!(dispatcher.state(), DispatchState::Fallback);
}
