//! The sidebar list of events.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    event::{Event, EventId, format_date},
};

/// A link to one event in the sidebar.
///
/// It will change appearance if `is_current` is set to `true`. Only one link
/// should be set as current at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: String,
    title: &'a str,
    date: String,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block px-3 py-2 rounded-lg bg-blue-50 text-blue-700 font-semibold \
            dark:bg-blue-900/30 dark:text-blue-200"
        } else {
            "block px-3 py-2 rounded-lg text-gray-900 hover:bg-gray-100 \
            hover:text-blue-700 dark:text-white dark:hover:bg-gray-700"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                span class="block" { (self.title) }

                @if !self.date.is_empty() {
                    span class="block text-xs text-gray-500 dark:text-gray-400" { (self.date) }
                }
            }
        )
    }
}

/// The list of events with the selected one highlighted.
pub struct EventNav<'a> {
    links: Vec<Link<'a>>,
}

impl<'a> EventNav<'a> {
    /// Create the navigation for `events`.
    ///
    /// The event whose ID matches `selected_event_id` is marked as current.
    pub fn new(events: &'a [Event], selected_event_id: Option<&EventId>) -> Self {
        let links = events
            .iter()
            .map(|event| Link {
                url: format_endpoint(endpoints::EVENT_VIEW, &[event.id.as_ref()]),
                title: &event.name,
                date: format_date(event.date),
                is_current: selected_event_id == Some(&event.id),
            })
            .collect();

        Self { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav aria-label="Events"
            {
                @if self.links.is_empty() {
                    p class="text-sm text-gray-500 dark:text-gray-400" { "No events yet." }
                } @else {
                    ul class="flex flex-col gap-1"
                    {
                        @for link in self.links {
                            li { (link.into_html()) }
                        }
                    }
                }
            }
        )
    }
}
