//! Projects a snapshot onto the page's display regions. Nothing here touches
//! the network; the same snapshot and unit flag always give the same output.

use std::fmt::Write as _;

use crate::model::WeatherSnapshot;

/// One HTML fragment per page region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRegions {
    pub current_temp: String,
    pub current_text: String,
    pub high: String,
    pub low: String,
    pub day_text: String,
    /// Empty when there is no UV data.
    pub uv_high: String,
    pub location: String,
}

pub fn render(weather: Option<&WeatherSnapshot>, metric: bool) -> Option<PageRegions> {
    let weather = weather?;
    let link = escape(&weather.link);
    let linked = |inner: &str| format!("<p><a href=\"{link}\">{inner}</a></p>");

    let (temp, high, low, unit) = if metric {
        (&weather.currently.alt_temp, &weather.today.alt_high, &weather.today.alt_low, 'C')
    } else {
        (&weather.currently.temp, &weather.today.high, &weather.today.low, 'F')
    };

    let uv_high = weather
        .today
        .high_uv
        .as_deref()
        .map(|uv| linked(&format!("<b>UV High:</b> {}<small>/12</small>", escape(uv))))
        .unwrap_or_default();

    Some(PageRegions {
        current_temp: linked(&format!("{}<sup>&deg;{unit}</sup>", escape(temp))),
        current_text: linked(&escape(&weather.currently.text)),
        high: linked(&format!("<b>High:</b> {}<sup>&deg;</sup>", escape(high))),
        low: linked(&format!("<b>Low:</b> {}<sup>&deg;</sup>", escape(low))),
        day_text: linked(&escape(&weather.today.text)),
        uv_high,
        location: format!(
            "<p id=\"location\"><a href=\"{link}\">{}, {}</a></p>",
            escape(&weather.location.city),
            escape(&weather.location.region)
        ),
    })
}

/// Label of the unit button: it offers the unit you are not looking at.
pub fn toggle_label(metric: bool) -> &'static str {
    if metric { "°F" } else { "°C" }
}

impl PageRegions {
    /// A standalone page with the regions laid out and `background` on `<body>`.
    pub fn page(&self, background: Option<&str>, metric: bool) -> String {
        let body_class = background.map(|c| format!(" class=\"{}\"", escape(c))).unwrap_or_default();

        format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head><meta charset=\"utf-8\"><title>Weather</title></head>\n\
             <body{body_class}>\n\
             {location}\n\
             <div id=\"current\">\n{current_temp}\n{current_text}\n</div>\n\
             <div id=\"details\">\n\
             <div>\n{high}\n{low}\n</div>\n\
             <div>\n{day_text}\n{uv_high}\n</div>\n\
             </div>\n\
             <button id=\"unitToggle\">{label}</button>\n\
             </body>\n\
             </html>\n",
            location = self.location,
            current_temp = self.current_temp,
            current_text = self.current_text,
            high = self.high,
            low = self.low,
            day_text = self.day_text,
            uv_high = self.uv_high,
            label = toggle_label(metric),
        )
    }
}

/// Plain text rendering for the terminal, including the days after today.
pub fn summary(weather: &WeatherSnapshot, metric: bool) -> String {
    let unit = if metric { 'C' } else { 'F' };
    let pick = |f: &str, c: &str| if metric { c.to_string() } else { f.to_string() };
    let mut out = String::new();

    let _ = writeln!(out, "{}, {}", weather.location.city, weather.location.region);
    let _ = writeln!(
        out,
        "Now:   {}°{unit}  {}",
        pick(&weather.currently.temp, &weather.currently.alt_temp),
        weather.currently.text
    );
    let _ = writeln!(
        out,
        "Today: high {}° / low {}°  {}",
        pick(&weather.today.high, &weather.today.alt_high),
        pick(&weather.today.low, &weather.today.alt_low),
        weather.today.text
    );

    match (&weather.today.high_uv, &weather.currently.uv) {
        (Some(high), Some(now)) => {
            let _ = writeln!(out, "UV:    {now}/12 now, high {high}/12");
        }
        (Some(high), None) => {
            let _ = writeln!(out, "UV:    high {high}/12");
        }
        _ => {}
    }

    for day in &weather.forecast {
        let _ = writeln!(
            out,
            "{:<6} high {}° / low {}°  {}",
            day.day,
            pick(&day.high, &day.alt_high),
            pick(&day.low, &day.alt_low),
            day.text
        );
    }

    let _ = write!(out, "Sunrise {}, sunset {}", weather.astronomy.sunrise, weather.astronomy.sunset);
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
