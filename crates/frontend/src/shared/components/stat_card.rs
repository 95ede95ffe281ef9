use crate::shared::icons::icon;
use leptos::prelude::*;

/// Visual tone of a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Neutral,
    Good,
    Warning,
    Bad,
}

impl CardTone {
    fn css_class(&self) -> &'static str {
        match self {
            CardTone::Good => "stat-card stat-card--success",
            CardTone::Bad => "stat-card stat-card--error",
            CardTone::Warning => "stat-card stat-card--warning",
            CardTone::Neutral => "stat-card",
        }
    }
}

/// Tone for the offline counter: any offline charge point is a warning,
/// all of them offline is an error.
pub fn offline_tone(offline: u32, total: u32) -> CardTone {
    match (offline, total) {
        (0, _) => CardTone::Good,
        (o, t) if o >= t => CardTone::Bad,
        _ => CardTone::Warning,
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional, into)]
    tone: Option<Signal<CardTone>>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || tone.map(|t| t.get()).unwrap_or(CardTone::Neutral).css_class();

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
                {subtitle_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_tone_levels() {
        assert_eq!(offline_tone(0, 0), CardTone::Good);
        assert_eq!(offline_tone(0, 10), CardTone::Good);
        assert_eq!(offline_tone(3, 10), CardTone::Warning);
        assert_eq!(offline_tone(10, 10), CardTone::Bad);
    }
}
