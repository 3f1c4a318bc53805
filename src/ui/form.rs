const MAX_FIELD_LEN: usize = 18;

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub text: String,
}

/// A small set of numeric text fields with one focused field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericForm {
    fields: Vec<FormField>,
    focus: usize,
}

impl NumericForm {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels
                .iter()
                .map(|&label| FormField {
                    label,
                    text: String::new(),
                })
                .collect(),
            focus: 0,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn text(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.text.as_str()).unwrap_or("")
    }

    /// Parsed value of a field; `None` when empty or not a number.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.text(index).parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn set_value(&mut self, index: usize, value: f64) {
        if let Some(field) = self.fields.get_mut(index) {
            field.text = format_input(value);
        }
    }

    pub fn clear(&mut self, index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            field.text.clear();
        }
    }

    pub fn is_empty(&self, index: usize) -> bool {
        self.text(index).is_empty()
    }

    pub fn input(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        if field.text.len() >= MAX_FIELD_LEN {
            return;
        }
        match c {
            '0'..='9' => field.text.push(c),
            '.' if !field.text.contains('.') => {
                if field.text.is_empty() {
                    field.text.push('0');
                }
                field.text.push('.');
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.text.pop();
        }
    }
}

/// Shortest text that parses back to `value`. Only when that does not fit the
/// field are trailing decimals dropped.
fn format_input(value: f64) -> String {
    let full = value.to_string();
    let Some(point) = full.find('.') else {
        return full;
    };
    if full.len() <= MAX_FIELD_LEN {
        return full;
    }
    let decimals = MAX_FIELD_LEN.saturating_sub(point + 1);
    let mut text = format!("{:.*}", decimals, value);
    text.truncate(MAX_FIELD_LEN);
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_decimal_point() {
        let mut form = NumericForm::new(&["Entry"]);
        for c in "1.2.5".chars() {
            form.input(c);
        }
        assert_eq!(form.text(0), "1.25");
        assert_eq!(form.value(0), Some(1.25));
    }

    #[test]
    fn leading_point_gets_zero() {
        let mut form = NumericForm::new(&["Amount"]);
        form.input('.');
        form.input('5');
        assert_eq!(form.text(0), "0.5");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = NumericForm::new(&["a", "b", "c"]);
        form.focus_prev();
        assert_eq!(form.focus(), 2);
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn set_value_trims_trailing_zeros() {
        let mut form = NumericForm::new(&["Price"]);
        form.set_value(0, 64000.0);
        assert_eq!(form.text(0), "64000");
        form.set_value(0, 150.5);
        assert_eq!(form.text(0), "150.5");
    }

    #[test]
    fn set_value_keeps_sub_cent_precision() {
        let mut form = NumericForm::new(&["Entry"]);
        form.set_value(0, 0.00001234);
        assert_eq!(form.text(0), "0.00001234");
        assert_eq!(form.value(0), Some(0.00001234));
        form.set_value(0, 0.4567);
        assert_eq!(form.text(0), "0.4567");
    }

    #[test]
    fn set_value_fits_field_width() {
        let mut form = NumericForm::new(&["Entry"]);
        form.set_value(0, 0.000012345678901234567);
        let text = form.text(0).to_string();
        assert!(text.len() <= MAX_FIELD_LEN);
        assert!(text.starts_with("0.00001234"));
        assert!(form.value(0).unwrap() > 0.0);
    }
}
