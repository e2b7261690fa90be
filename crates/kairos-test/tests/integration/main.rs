mod corruption;
mod cross_form;
mod occurrences;
