use lingua_catalog::{GoalId, LanguageId, TeacherDirectory, TeacherId};
use lingua_desk::booking::{BookingAction, BookingState};
use lingua_desk::contact::{ContactChannel, SHARE_URL_BASE, compose_booking_message, encode_component};
use lingua_desk::i18n::Catalog;
use percent_encoding::percent_decode_str;

fn completed_booking() -> BookingState {
    let directory = TeacherDirectory::embedded().unwrap();
    let mut state = BookingState::new();
    for action in [
        BookingAction::SelfServe,
        BookingAction::SelectLanguage(LanguageId::De),
        BookingAction::Next,
        BookingAction::SelectGoal(GoalId::Move),
        BookingAction::Next,
        BookingAction::SelectTeacher(TeacherId::from("anna")),
    ] {
        state.apply(&action, &directory);
    }
    state
}

#[test]
fn booking_message_lists_selection_in_fixed_order() {
    let directory = TeacherDirectory::embedded().unwrap();
    let catalog = Catalog::for_locale("uk");
    let message = compose_booking_message(completed_booking().selection(), &directory, &catalog);
    assert_eq!(
        message,
        "Привіт! Хочу записатися на пробний урок.\n\
         \n\
         Мова: Німецька\n\
         Ціль: Переїзд\n\
         Викладач: Анна Коваль\n\
         \n\
         Підкажіть, будь ласка, найближчий вільний час 🙂"
    );
}

#[test]
fn unset_fields_render_as_dash() {
    let directory = TeacherDirectory::embedded().unwrap();
    let catalog = Catalog::for_locale("en");
    let message = compose_booking_message(BookingState::new().selection(), &directory, &catalog);
    let lines: Vec<_> = message.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(&lines[2..5], ["Language: —", "Goal: —", "Teacher: —"]);
}

#[test]
fn placeholder_base_uses_share_url() {
    let channel = ContactChannel::new("https://t.me/");
    let link = channel.link_with_text("Hi there");
    assert_eq!(link, format!("{SHARE_URL_BASE}?text=Hi%20there"));
    assert_eq!(
        ContactChannel::new("https://t.me").link_with_text("x"),
        "https://t.me/share/url?text=x"
    );
}

#[test]
fn real_base_appends_text_parameter() {
    assert_eq!(
        ContactChannel::new("https://t.me/school").link_with_text("a&b"),
        "https://t.me/school?text=a%26b"
    );
    assert_eq!(
        ContactChannel::new("https://wa.me/123?lang=uk").link_with_text("a b"),
        "https://wa.me/123?lang=uk&text=a%20b"
    );
}

#[test]
fn finished_booking_link_decodes_back_to_the_message() {
    let directory = TeacherDirectory::embedded().unwrap();
    let catalog = Catalog::for_locale("uk");
    let contact = ContactChannel::default();
    let state = completed_booking();
    let link = state
        .finish(&directory, &catalog, &contact)
        .expect("all fields chosen");
    let encoded = link
        .strip_prefix("https://t.me/share/url?text=")
        .expect("placeholder contact uses the share url");
    let message = compose_booking_message(state.selection(), &directory, &catalog);
    assert_eq!(encoded, encode_component(&message));
    assert_eq!(percent_decode_str(encoded).decode_utf8().unwrap(), message);
    assert!(encoded.starts_with("%D0%9F%D1%80%D0%B8%D0%B2%D1%96%D1%82!%20"));
    assert!(encoded.contains("%0A%0A"));
}
