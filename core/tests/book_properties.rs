use bookgate_core::access::{FlagStore, MemoryStore, ENTRY_POINT, SIGNED_UP_KEY};
use bookgate_core::navigation;
use bookgate_core::qualification::{
    EmailInput, FinalOutcome, NameInput, ProfileInput, QualificationFlow, REDIRECT_DELAY_MS,
};
use bookgate_core::{book, Gate, GateDecision, Session};
use chrono::Utc;

#[test]
fn previous_then_next_returns_to_the_same_page() {
    let book = book();
    for page in book.all_pages() {
        if let Some(prev) = book.previous_page(&page.id) {
            let back = book.next_page(&prev.id).expect("previous page has a next page");
            assert_eq!(back.id, page.id);
        }
        if let Some(next) = book.next_page(&page.id) {
            let back = book.previous_page(&next.id).expect("next page has a previous page");
            assert_eq!(back.id, page.id);
        }
    }
}

#[test]
fn progress_is_monotonic_and_ends_at_100() {
    let book = book();
    let mut last = 0;
    for page in book.all_pages() {
        let progress = book.reading_progress(&page.id);
        assert!(progress >= last, "{} went backwards", page.id);
        assert!(progress <= 100);
        last = progress;
    }
    assert_eq!(last, 100);
    assert_eq!(book.reading_progress("no-such-page"), 0);
}

#[test]
fn every_page_in_range_is_listed_under_its_chapter() {
    let book = book();
    let toc = book.table_of_contents();
    for listing in &toc {
        for page in book.all_pages() {
            if listing.chapter.contains(page.page_number) {
                assert!(
                    listing.pages.iter().any(|p| p.id == page.id),
                    "{} missing from {}",
                    page.id,
                    listing.chapter.id
                );
            }
        }
    }
}

#[test]
fn gated_page_scenario() {
    let store = MemoryStore::new();

    let session = Session::read(&store);
    let mut gate = Gate::new();
    assert_eq!(
        gate.evaluate(&session),
        GateDecision::Redirect(ENTRY_POINT.to_string())
    );

    store.set(SIGNED_UP_KEY, "true");
    let session = Session::read(&store);
    let mut gate = Gate::new();
    assert_eq!(gate.evaluate(&session), GateDecision::Render);

    let nav = navigation::resolve(book(), "page-3").expect("page-3 exists");
    assert_eq!(nav.previous.map(|p| p.id.as_str()), Some("page-2"));
    assert_eq!(nav.next.map(|p| p.id.as_str()), Some("page-4"));
    let total = book().total_pages() as f64;
    assert_eq!(nav.progress, (3.0 / total * 100.0).round() as u8);
}

#[test]
fn qualification_success_leads_to_first_page_after_delay() {
    let store = MemoryStore::new();
    let mut session = Session::read(&store);
    let first = book().first_page().expect("book has pages").href();

    let mut flow = QualificationFlow::new(first.clone());
    flow.submit_email(EmailInput {
        email: "reader@example.com".into(),
        honeypot: String::new(),
    });
    flow.submit_name(NameInput {
        first_name: "Rosalind".into(),
        last_name: "Franklin".into(),
        honeypot: String::new(),
    });
    let outcome = flow.submit_profile(ProfileInput {
        role: "scientific-founder-cso".into(),
        company_focus: "rd-discovery".into(),
        biggest_challenge: "culture".into(),
        team_size: "solo-duo".into(),
        referral_source: "linkedin".into(),
        honeypot: String::new(),
    });
    let FinalOutcome::Submit(request) = outcome else {
        panic!("expected a submission");
    };
    assert_eq!(request.custom_fields().len(), 6);

    let redirect = flow.submission_succeeded(&mut session, &store, Utc::now());
    assert_eq!(redirect.to, first);
    assert_eq!(redirect.delay_ms, REDIRECT_DELAY_MS);
    assert!(redirect.delay_ms > 0);
    assert!(Session::read(&store).has_access());
}
