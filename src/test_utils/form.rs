use scraper::{ElementRef, Html, Selector};

/// The form whose `id` is `form_id`.
#[track_caller]
pub(crate) fn must_get_form<'a>(html: &'a Html, form_id: &str) -> ElementRef<'a> {
    html.select(&Selector::parse(&format!("form#{form_id}")).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No form found with id {form_id:?}"))
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Check that `form` has a control called `name` with the given tag, and for
/// inputs, the given type. `required` is checked both ways.
#[track_caller]
pub(crate) fn assert_form_field(
    form: &ElementRef<'_>,
    name: &str,
    tag: &str,
    type_: Option<&str>,
    required: bool,
) {
    let selector = Selector::parse(&format!("{tag}[name=\"{name}\"]")).unwrap();
    let field = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No {tag} found with name {name:?}"));

    if let Some(type_) = type_ {
        let got_type = field.value().attr("type").unwrap_or_default();
        assert_eq!(got_type, type_, "want {name} with type {type_:?}, got {got_type:?}");
    }

    assert_eq!(
        field.value().attr("required").is_some(),
        required,
        "want {name} to be required: {required}"
    );
}

/// Check the value of the selected option in the select called `name`.
#[track_caller]
pub(crate) fn assert_selected_option(form: &ElementRef<'_>, name: &str, want_value: &str) {
    let selector = Selector::parse(&format!("select[name=\"{name}\"] option[selected]")).unwrap();
    let selected: Vec<_> = form
        .select(&selector)
        .filter_map(|option| option.value().attr("value"))
        .collect();

    assert_eq!(selected, vec![want_value], "selected options of {name}");
}

#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_error_message: &str) {
    let p = Selector::parse("p").unwrap();
    let error_message = form
        .select(&p)
        .map(|p| p.text().collect::<String>())
        .find(|text| text.trim().starts_with("Error:"))
        .expect("No error message found");

    assert_eq!(want_error_message, error_message.trim());
}
