#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_error_message, assert_form_field, assert_hx_endpoint, assert_selected_option,
    must_get_form,
};
pub(crate) use html::{
    assert_valid_html, element_texts, must_select_one, parse_html_document, parse_html_fragment,
};
pub(crate) use http::{assert_hx_redirect, assert_html_content_type};
