//! Newsletter and contact form bindings.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, FormData, HtmlFormElement, HtmlInputElement, Window};

use shakes_site_core::{
    ContactForm, ContactSubmission, FormConfig, FormView, NewsletterForm, Result, SiteError,
};

use crate::dom::{JsResultExt, describe};
use crate::mount::Mounted;

/// Acknowledges with `window.alert` and resets the form element.
pub struct AlertingForm {
    window: Window,
    form: HtmlFormElement,
}

impl FormView for AlertingForm {
    fn acknowledge(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            warn!(error = %describe(&err), "failed to show acknowledgement");
        }
    }

    fn reset(&mut self) {
        self.form.reset();
    }
}

fn as_form(element: Element, what: &str) -> Option<HtmlFormElement> {
    match element.dyn_into::<HtmlFormElement>() {
        Ok(form) => Some(form),
        Err(_) => {
            warn!(what, "form selector matched a non-form element");
            None
        }
    }
}

/// Value of the form's email field, empty if there isn't one.
fn read_email(form: &HtmlFormElement, selector: &str) -> String {
    form.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// All named fields of `form`. Non-text values (files) read as empty.
pub fn collect_fields(form: &HtmlFormElement) -> Result<ContactSubmission> {
    let data = FormData::new_with_form(form).js_context("reading form data")?;
    let entries = js_sys::try_iter(&data)
        .js_context("iterating form data")?
        .ok_or_else(|| SiteError::Js {
            context: "iterating form data",
            message: "FormData is not iterable".into(),
        })?;

    let mut fields = Vec::new();
    for entry in entries {
        let pair: js_sys::Array = entry.js_context("reading form entry")?.unchecked_into();
        let name = pair.get(0).as_string().unwrap_or_default();
        let value = pair.get(1).as_string().unwrap_or_default();
        fields.push((name, value));
    }
    Ok(ContactSubmission::from_entries(fields))
}

pub fn mount_newsletter(
    window: &Window,
    document: &Document,
    config: &FormConfig,
) -> Result<Option<Mounted>> {
    let Some(form) = document
        .get_element_by_id(&config.newsletter_id)
        .and_then(|el| as_form(el, "newsletter"))
    else {
        debug!("no newsletter form on this page");
        return Ok(None);
    };

    let newsletter = Rc::new(RefCell::new(NewsletterForm::new(AlertingForm {
        window: window.clone(),
        form: form.clone(),
    })));

    let selector = config.newsletter_email_selector.clone();
    let target = form.clone();
    let mut mounted = Mounted::new("newsletter-form");
    mounted.listen(EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let email = read_email(&target, &selector);
            newsletter.borrow_mut().submit(email);
        },
    ));

    Ok(Some(mounted))
}

pub fn mount_contact(
    window: &Window,
    document: &Document,
    config: &FormConfig,
) -> Result<Option<Mounted>> {
    let Some(form) = document
        .query_selector(&config.contact_selector)
        .js_context("querying contact form")?
        .and_then(|el| as_form(el, "contact"))
    else {
        debug!("no contact form on this page");
        return Ok(None);
    };

    let contact = Rc::new(RefCell::new(ContactForm::new(AlertingForm {
        window: window.clone(),
        form: form.clone(),
    })));

    let target = form.clone();
    let mut mounted = Mounted::new("contact-form");
    mounted.listen(EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let submission = match collect_fields(&target) {
                Ok(submission) => submission,
                Err(err) => {
                    warn!(%err, "could not read contact form, acknowledging anyway");
                    ContactSubmission::default()
                }
            };
            contact.borrow_mut().submit(submission);
        },
    ));

    Ok(Some(mounted))
}
