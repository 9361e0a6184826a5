//! Human-readable service labels for reservations and cart items.

use crate::domain::details::ServiceDetails;
use crate::domain::reservation::Reservation;

/// Formats `name` with the most relevant detail of `details`.
pub fn format_service_name(name: &str, details: &ServiceDetails) -> String {
    match details {
        ServiceDetails::Pack { pack } => format!("{name} - Pack {pack}"),
        ServiceDetails::Mattress { size, count } => {
            format!("{name} - {size}cm ({count} matelas)")
        }
        ServiceDetails::Seats { seats } => format!("{name} - {seats} place(s)"),
        ServiceDetails::Rooms {
            rooms,
            deep_cleaning,
            window_cleaning,
        } => {
            let mut label = format!("{name} - {rooms} pièce(s)");
            let extras: Vec<&str> = [
                (*deep_cleaning, "Nettoyage profond"),
                (*window_cleaning, "Vitres"),
            ]
            .into_iter()
            .filter_map(|(enabled, extra)| enabled.then_some(extra))
            .collect();
            if !extras.is_empty() {
                label.push_str(&format!(" ({})", extras.join(", ")));
            }
            label
        }
        ServiceDetails::Surface { surface, frequency } => match frequency {
            Some(frequency) => format!("{name} - {surface}m² ({frequency})"),
            None => format!("{name} - {surface}m²"),
        },
        ServiceDetails::SurfaceType { surface_type } => format!("{name} - {surface_type}"),
        ServiceDetails::Size { size } => format!("{name} - {size}"),
        ServiceDetails::Unspecified => name.to_string(),
    }
}

/// Label for the main service of a reservation.
///
/// Multi-service reservations are labelled after their first sub-service only.
pub fn main_service_display(reservation: &Reservation) -> String {
    match reservation.sub_services.first() {
        Some(first) => format_service_name(&first.name, &first.form_data),
        None => format_service_name(&reservation.service_name, &reservation.service_details),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::details::Frequency;

    #[test]
    fn rooms_without_extras_have_no_parenthetical() {
        let details = ServiceDetails::Rooms {
            rooms: "2".into(),
            deep_cleaning: false,
            window_cleaning: false,
        };
        assert_eq!(format_service_name("Ménage", &details), "Ménage - 2 pièce(s)");
    }

    #[test]
    fn rooms_list_enabled_extras() {
        let details = ServiceDetails::Rooms {
            rooms: "5".into(),
            deep_cleaning: true,
            window_cleaning: true,
        };
        assert_eq!(
            format_service_name("Ménage", &details),
            "Ménage - 5 pièce(s) (Nettoyage profond, Vitres)"
        );
    }

    #[test]
    fn surface_frequency_is_optional() {
        let monthly = ServiceDetails::Surface {
            surface: "300".into(),
            frequency: Some(Frequency::Monthly),
        };
        let bare = ServiceDetails::Surface {
            surface: "300".into(),
            frequency: None,
        };
        assert_eq!(format_service_name("Bureaux", &monthly), "Bureaux - 300m² (Mensuel)");
        assert_eq!(format_service_name("Bureaux", &bare), "Bureaux - 300m²");
    }

    #[test]
    fn remaining_shapes() {
        let pack = ServiceDetails::Pack { pack: "Confort".into() };
        let seats = ServiceDetails::Seats { seats: "3".into() };
        let floor = ServiceDetails::SurfaceType { surface_type: "Marbre".into() };
        let rug = ServiceDetails::Size { size: "Grand".into() };
        assert_eq!(format_service_name("Chantier", &pack), "Chantier - Pack Confort");
        assert_eq!(format_service_name("Canapé", &seats), "Canapé - 3 place(s)");
        assert_eq!(format_service_name("Sols", &floor), "Sols - Marbre");
        assert_eq!(format_service_name("Tapis", &rug), "Tapis - Grand");
    }
}
