//! Checklist of category labels

use egui::Ui;

use crate::histogram::HistogramTable;
use crate::state::{ControlEvent, ControlState};

/// One checkbox per label, each selected label tagged with its bar color
pub struct CategoryChecklist<'a> {
    labels: &'a [String],
    state: &'a ControlState,
    output: &'a HistogramTable,
}

impl<'a> CategoryChecklist<'a> {
    pub fn new(labels: &'a [String], state: &'a ControlState, output: &'a HistogramTable) -> Self {
        Self {
            labels,
            state,
            output,
        }
    }

    /// Show the list; returns the toggle event if a box was clicked this frame
    pub fn show(self, ui: &mut Ui) -> Option<ControlEvent> {
        let mut event = None;

        egui::ScrollArea::vertical()
            .id_salt("category_checklist")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for label in self.labels {
                    let mut active = self.state.is_selected(label);
                    ui.horizontal(|ui| {
                        let summary = self.output.categories().iter().find(|c| &c.label == label);
                        match summary {
                            Some(summary) => {
                                ui.colored_label(summary.color.to_color32(), "■");
                            }
                            None => {
                                ui.colored_label(ui.visuals().weak_text_color(), "□");
                            }
                        }

                        let response = ui.checkbox(&mut active, label.as_str());
                        if let Some(summary) = summary {
                            response.clone().on_hover_text(format!(
                                "{} of {} records in range ({})",
                                summary.in_range,
                                summary.total,
                                summary.color
                            ));
                        }
                        if response.changed() {
                            event = Some(ControlEvent::CategoryToggled {
                                label: label.clone(),
                                active,
                            });
                        }
                    });
                }
            });

        event
    }
}
