//! Bus stops and the facilities around them

use serde::Serialize;

use super::types::{Position, StopIndex};

/// A facility found near a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facility {
    Toilet,
    Market,
    Atm,
    Cafe,
    Parking,
    Wifi,
    Food,
    Pharmacy,
    Store,
    Gym,
    Library,
    Hospital,
}

impl Facility {
    /// Label shown on the stop cards
    pub fn label(self) -> &'static str {
        match self {
            Facility::Toilet => "ห้องน้ำ",
            Facility::Market => "ตลาดนัด",
            Facility::Atm => "ตู้ ATM",
            Facility::Cafe => "ร้านกาแฟ",
            Facility::Parking => "ที่จอดรถ",
            Facility::Wifi => "Wi-Fi",
            Facility::Food => "ร้านอาหาร",
            Facility::Pharmacy => "ร้านยา",
            Facility::Store => "ร้านสะดวกซื้อ",
            Facility::Gym => "ฟิตเนส",
            Facility::Library => "ห้องสมุด",
            Facility::Hospital => "โรงพยาบาล",
        }
    }
}

/// A stop on the campus loop
#[derive(Debug, Clone, Serialize)]
pub struct SimStop {
    /// 1-based display id
    pub id: usize,
    pub index: StopIndex,
    pub name: String,
    pub name_en: String,
    pub code: String,
    pub facilities: Vec<Facility>,
    /// Layout coordinates from the campus plan
    pub position: Position,
}

impl SimStop {
    pub fn new(
        index: StopIndex,
        name: &str,
        name_en: &str,
        facilities: &[Facility],
        position: Position,
    ) -> Self {
        let id = index.0 + 1;
        Self {
            id,
            index,
            name: name.to_string(),
            name_en: name_en.to_string(),
            code: format!("P{}", id),
            facilities: facilities.to_vec(),
            position,
        }
    }
}

/// The ten stops of the campus loop, in driving order
pub fn campus_stops() -> Vec<SimStop> {
    use Facility::*;

    let data: [(&str, &str, &[Facility], f32, f32); 10] = [
        ("ประตูหลัก", "Main Gate", &[Parking, Toilet, Atm], 150.0, 190.0),
        ("คณะครุศาสตร์", "Faculty of Education", &[Toilet, Cafe], 350.0, 80.0),
        ("หอสมุดกลาง", "Central Library", &[Toilet, Wifi, Cafe, Library], 560.0, 100.0),
        ("อาคารวิทยาศาสตร์", "Science Building", &[Toilet, Cafe, Atm], 700.0, 190.0),
        ("อาคารกีฬา", "Sports Complex", &[Toilet, Gym, Store], 800.0, 250.0),
        ("หอพักนักศึกษา", "Student Dormitory", &[Store, Market, Toilet, Wifi], 750.0, 370.0),
        ("คณะวิศวกรรมศาสตร์", "Engineering Faculty", &[Toilet, Parking, Cafe], 550.0, 420.0),
        ("อาคารบริหาร", "Administration Building", &[Toilet, Atm, Parking], 350.0, 400.0),
        ("โรงอาหาร", "Canteen", &[Food, Toilet, Market, Wifi], 200.0, 350.0),
        ("ศูนย์แพทย์", "Medical Center", &[Hospital, Pharmacy, Toilet], 120.0, 230.0),
    ];

    data.iter()
        .enumerate()
        .map(|(i, (name, name_en, facilities, x, y))| {
            SimStop::new(StopIndex(i), name, name_en, facilities, Position::new(*x, *y))
        })
        .collect()
}
