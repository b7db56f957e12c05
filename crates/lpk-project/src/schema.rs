//! Voyage report schema definitions.
//!
//! Serialized keys follow the established report bundle format (Indonesian
//! column names), so bundles written by earlier tooling load unchanged.

use lpk_core::{FieldValue, Real, RecordId};
use serde::{Deserialize, Serialize};

/// Office name of the roster row mirrored from the header captain fields.
pub const CAPTAIN_OFFICE: &str = "Nakhoda";
/// Office name of the roster row mirrored from the header chief officer fields.
pub const CHIEF_OFFICER_OFFICE: &str = "Mualim I";

pub const DEFAULT_PROVISIONS: Real = 20.0;

pub const DEFAULT_NOTES_LABEL: &str = "Jelaskan dengan singkat ttg: Kerusakan, berhenti karena Kamar Mesin, pembuatan Kisah Kapal, lain2 hal, keadaan angin, cuaca, laut, pada waktu berlabuh, keadaan dalamnya air di berting-beting.";

const DEFAULT_CREW_OFFICES: [&str; 18] = [
    CAPTAIN_OFFICE,
    CHIEF_OFFICER_OFFICE,
    "Mualim II",
    "Mualim III",
    "Mualim IV",
    "P.U.K",
    "Markonis",
    "KKM",
    "Masinis I",
    "Masinis II",
    "Masinis III",
    "Masinis IV",
    "Perawat",
    "Jenang",
    "Serang",
    "Cadet Deck",
    "Cadet Mesin",
    "ABK lainnya",
];

/// Complete working report: everything the printed report is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoyageSnapshot {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub legs: Vec<VoyageLeg>,
    #[serde(default)]
    pub header: ReportHeader,
    #[serde(default, rename = "cargoLogs")]
    pub cargo_logs: Vec<CargoActivity>,
    #[serde(default, rename = "safetyData")]
    pub safety: SafetyData,
    #[serde(default = "default_crew_list", rename = "crewList")]
    pub crew: Vec<CrewMember>,
    #[serde(default, rename = "freshWater")]
    pub fresh_water: FreshWaterData,
}

impl Default for VoyageSnapshot {
    fn default() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            legs: Vec::new(),
            header: ReportHeader::default(),
            cargo_logs: Vec::new(),
            safety: SafetyData::default(),
            crew: default_crew_list(),
            fresh_water: FreshWaterData::default(),
        }
    }
}

/// One sailing segment between two ports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoyageLeg {
    pub id: RecordId,
    pub no: u32,
    #[serde(rename = "dari")]
    pub from_port: String,
    #[serde(rename = "ke")]
    pub to_port: String,

    #[serde(rename = "bertolak_tanggal")]
    pub departure_date: String,
    #[serde(rename = "bertolak_jam")]
    pub departure_time: String,
    #[serde(rename = "tiba_tanggal")]
    pub arrival_date: String,
    #[serde(rename = "tiba_jam")]
    pub arrival_time: String,

    /// Underway ("full away") duration, whole days.
    #[serde(rename = "durasi_hari")]
    pub duration_days: Real,
    /// Underway duration remainder as `HH.MM`.
    #[serde(rename = "durasi_jam")]
    pub duration_hours: String,

    #[serde(rename = "jarak")]
    pub total_distance: Real,
    #[serde(rename = "jarak_full_away")]
    pub open_sea_distance: Real,
    #[serde(rename = "jarak_alur")]
    pub channel_distance: Real,
    #[serde(rename = "kecepatan")]
    pub speed: Real,
    #[serde(rename = "putaran_mesin")]
    pub engine_rpm: String,

    #[serde(rename = "berlabuh_tgl_mulai")]
    pub anchor_start_date: String,
    #[serde(rename = "berlabuh_jam_mulai")]
    pub anchor_start_time: String,
    #[serde(rename = "berlabuh_tgl_selesai")]
    pub anchor_end_date: String,
    #[serde(rename = "berlabuh_jam_selesai")]
    pub anchor_end_time: String,

    #[serde(rename = "pelabuhan_bm")]
    pub cargo_port: String,
    #[serde(rename = "kegiatan_bm")]
    pub cargo_activity: String,
    #[serde(rename = "mulai_bm")]
    pub cargo_start: String,
    #[serde(rename = "selesai_bm")]
    pub cargo_end: String,

    #[serde(rename = "muatan_dimuat")]
    pub cargo_loaded: FieldValue,
    #[serde(rename = "muatan_dibongkar")]
    pub cargo_unloaded: FieldValue,
    /// Loaded + unloaded ("jumlah yang dikerjakan").
    #[serde(rename = "muatan_total")]
    pub cargo_handled: FieldValue,
    /// Running cargo-on-board total after this leg.
    #[serde(rename = "muatan_semua")]
    pub cargo_on_board: Real,

    #[serde(rename = "rob_tiba_fo")]
    pub arrival_fuel_rob: Real,
    #[serde(rename = "rob_tiba_fw")]
    pub arrival_water_rob: Real,
    #[serde(rename = "rob_fo")]
    pub fuel_rob: Real,
    #[serde(rename = "rob_fw")]
    pub water_rob: Real,
    #[serde(rename = "rob_ballast")]
    pub ballast_rob: Real,
    #[serde(rename = "perbekalan")]
    pub provisions: Real,

    #[serde(rename = "total_bobot")]
    pub total_weight: Real,

    #[serde(rename = "terima_fo")]
    pub fuel_received: FieldValue,
    #[serde(rename = "terima_fw")]
    pub water_received: FieldValue,

    #[serde(rename = "pakai_fo")]
    pub fuel_used: Real,
    #[serde(rename = "pakai_fw")]
    pub water_used: Real,

    #[serde(rename = "draft_depan")]
    pub draft_fore: Real,
    #[serde(rename = "draft_belakang")]
    pub draft_aft: Real,

    pub pax_1a: Real,
    pub pax_1b: Real,
    pub pax_2a: Real,
    pub pax_2b: Real,
    #[serde(rename = "pax_ekonomi")]
    pub pax_economy: Real,
    pub pax_total: Real,
}

impl Default for VoyageLeg {
    fn default() -> Self {
        Self {
            id: RecordId::default(),
            no: 1,
            from_port: String::new(),
            to_port: String::new(),
            departure_date: String::new(),
            departure_time: String::new(),
            arrival_date: String::new(),
            arrival_time: String::new(),
            duration_days: 0.0,
            duration_hours: "00.00".to_string(),
            total_distance: 0.0,
            open_sea_distance: 0.0,
            channel_distance: 0.0,
            speed: 0.0,
            engine_rpm: String::new(),
            anchor_start_date: String::new(),
            anchor_start_time: String::new(),
            anchor_end_date: String::new(),
            anchor_end_time: String::new(),
            cargo_port: String::new(),
            cargo_activity: "-".to_string(),
            cargo_start: String::new(),
            cargo_end: String::new(),
            cargo_loaded: FieldValue::dash(),
            cargo_unloaded: FieldValue::dash(),
            cargo_handled: FieldValue::dash(),
            cargo_on_board: 0.0,
            arrival_fuel_rob: 0.0,
            arrival_water_rob: 0.0,
            fuel_rob: 0.0,
            water_rob: 0.0,
            ballast_rob: 0.0,
            provisions: DEFAULT_PROVISIONS,
            total_weight: 0.0,
            fuel_received: FieldValue::dash(),
            water_received: FieldValue::dash(),
            fuel_used: 0.0,
            water_used: 0.0,
            draft_fore: 0.0,
            draft_aft: 0.0,
            pax_1a: 0.0,
            pax_1b: 0.0,
            pax_2a: 0.0,
            pax_2b: 0.0,
            pax_economy: 0.0,
            pax_total: 0.0,
        }
    }
}

impl VoyageLeg {
    /// True when the leg records a loading/unloading activity.
    pub fn has_cargo_activity(&self) -> bool {
        let activity = self.cargo_activity.trim();
        !activity.is_empty() && activity != "-"
    }
}

/// Static voyage metadata printed in the report header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportHeader {
    #[serde(rename = "nomor")]
    pub voyage_number: String,
    #[serde(rename = "tahun")]
    pub year: String,

    #[serde(rename = "kapal")]
    pub ship_name: String,
    #[serde(rename = "type_kapal")]
    pub ship_type: String,
    pub dwt: String,
    pub service: String,
    pub callsign: String,

    #[serde(rename = "nama_nakhoda")]
    pub captain_name: String,
    #[serde(rename = "nrp_nakhoda")]
    pub captain_id: String,
    #[serde(rename = "nama_mualim_1")]
    pub chief_officer_name: String,
    #[serde(rename = "nrp_mualim_1")]
    pub chief_officer_id: String,
    #[serde(rename = "kode_trayek")]
    pub route_code: String,
    pub ballast_space: String,
    #[serde(rename = "mulai_perjalanan")]
    pub voyage_start: String,
    #[serde(rename = "akhir_perjalanan")]
    pub voyage_end: String,

    #[serde(rename = "perusahaan")]
    pub company: String,
    #[serde(rename = "kecepatan_max")]
    pub max_speed: String,
    pub fo_consumption: String,
    pub fw_consumption: String,
    #[serde(rename = "disp_penumpang")]
    pub passenger_capacity: String,

    #[serde(rename = "sert_keselamatan")]
    pub safety_certificate: String,
    pub special_survey: String,
    pub annual_survey: String,
    pub number_hatches: String,
    pub loa: String,

    #[serde(rename = "keterangan")]
    pub remarks: String,
    #[serde(rename = "label_keterangan")]
    pub remarks_label: String,
    #[serde(rename = "catatan")]
    pub notes: String,

    #[serde(rename = "logoLeft")]
    pub logo_left: String,
    #[serde(rename = "logoRight")]
    pub logo_right: String,

    #[serde(rename = "isFirstEntry", skip_serializing_if = "Option::is_none")]
    pub is_first_entry: Option<bool>,
    #[serde(rename = "previousVoyageNumber", skip_serializing_if = "Option::is_none")]
    pub previous_voyage_number: Option<String>,
}

impl Default for ReportHeader {
    fn default() -> Self {
        Self {
            voyage_number: String::new(),
            year: String::new(),
            ship_name: String::new(),
            ship_type: String::new(),
            dwt: String::new(),
            service: String::new(),
            callsign: String::new(),
            captain_name: String::new(),
            captain_id: String::new(),
            chief_officer_name: String::new(),
            chief_officer_id: String::new(),
            route_code: String::new(),
            ballast_space: String::new(),
            voyage_start: String::new(),
            voyage_end: String::new(),
            company: String::new(),
            max_speed: String::new(),
            fo_consumption: String::new(),
            fw_consumption: String::new(),
            passenger_capacity: String::new(),
            safety_certificate: String::new(),
            special_survey: String::new(),
            annual_survey: String::new(),
            number_hatches: String::new(),
            loa: String::new(),
            remarks: String::new(),
            remarks_label: DEFAULT_NOTES_LABEL.to_string(),
            notes: String::new(),
            logo_left: String::new(),
            logo_right: String::new(),
            is_first_entry: Some(true),
            previous_voyage_number: Some(String::new()),
        }
    }
}

/// Loading/unloading log row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CargoActivity {
    pub id: RecordId,
    #[serde(rename = "pelabuhan")]
    pub port: String,
    #[serde(rename = "tanggal")]
    pub date: String,
    #[serde(rename = "mulai_tgl")]
    pub start_date: String,
    #[serde(rename = "mulai_jam")]
    pub start_time: String,
    #[serde(rename = "selesai_tgl")]
    pub end_date: String,
    #[serde(rename = "selesai_jam")]
    pub end_time: String,
    #[serde(rename = "jenis_kegiatan")]
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CrewMember {
    #[serde(rename = "jabatan")]
    pub office: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "nrp")]
    pub staff_id: String,
    #[serde(rename = "tanggal_ditempatkan", skip_serializing_if = "Option::is_none")]
    pub posted_on: Option<String>,
    #[serde(rename = "tanggal_dipindahkan", skip_serializing_if = "Option::is_none")]
    pub transferred_on: Option<String>,
}

impl CrewMember {
    pub fn vacant(office: &str) -> Self {
        Self {
            office: office.to_string(),
            name: String::new(),
            staff_id: String::new(),
            posted_on: Some(String::new()),
            transferred_on: Some(String::new()),
        }
    }
}

/// The standard roster: one vacant row per office, captain and chief
/// officer first.
pub fn default_crew_list() -> Vec<CrewMember> {
    DEFAULT_CREW_OFFICES
        .iter()
        .map(|office| CrewMember::vacant(office))
        .collect()
}

/// Life-saving and fire-fighting equipment status, drills, and the chief
/// officer's signature block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SafetyData {
    #[serde(rename = "sekoci_menurut_peraturan")]
    pub lifeboats_required: String,
    #[serde(rename = "sekoci_ada")]
    pub lifeboats_present: String,
    #[serde(rename = "rakit_menurut_peraturan")]
    pub liferafts_required: String,
    #[serde(rename = "rakit_ada")]
    pub liferafts_present: String,

    #[serde(rename = "latihan_sekoci_tgl")]
    pub boat_drill_date: String,
    #[serde(rename = "latihan_kebakaran_tgl")]
    pub fire_drill_date: String,

    #[serde(rename = "pompa_hydran")]
    pub hydrant_pump: String,
    #[serde(rename = "pemadam_api")]
    pub fire_extinguishers: String,
    #[serde(rename = "saluran_hydran")]
    pub hydrant_line: String,
    #[serde(rename = "gasmasker")]
    pub gas_masks: String,
    #[serde(rename = "alat_oxygen")]
    pub oxygen_apparatus: String,
    pub mes: String,
    #[serde(rename = "pemeriksaan_tikus")]
    pub rat_inspection: String,
    #[serde(rename = "kemudi_darurat")]
    pub emergency_steering: String,
    #[serde(rename = "naik_dok_terakhir")]
    pub last_dry_dock: String,

    pub service_co2_system: String,
    pub service_apar_foam: String,
    pub service_apar_co2: String,
    pub service_apar_powder: String,

    #[serde(rename = "mualim_1")]
    pub chief_officer_name: String,
    #[serde(rename = "nrp_mualim_1")]
    pub chief_officer_id: String,
    #[serde(rename = "jumlah_abk_total")]
    pub crew_on_board: String,
}

/// How fresh water was supplied at a port.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SupplyMethod {
    /// Alongside the quay.
    #[default]
    #[serde(rename = "KADE")]
    Quay,
    /// Road tanker.
    #[serde(rename = "MOBIL")]
    Truck,
    #[serde(rename = "TONGKANG")]
    Barge,
    #[serde(rename = "LAINNYA")]
    Other,
    #[serde(rename = "")]
    Unspecified,
}

impl SupplyMethod {
    pub fn label(&self) -> &'static str {
        match self {
            SupplyMethod::Quay => "KADE",
            SupplyMethod::Truck => "MOBIL",
            SupplyMethod::Barge => "TONGKANG",
            SupplyMethod::Other => "LAINNYA",
            SupplyMethod::Unspecified => "",
        }
    }
}

/// One fresh-water handling event at a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FreshWaterEntry {
    pub id: RecordId,
    pub no: u32,
    #[serde(rename = "pelabuhan")]
    pub port: String,
    #[serde(rename = "tanggal")]
    pub date: String,
    #[serde(rename = "sisa_air_sebelum")]
    pub reserve_before: FieldValue,
    #[serde(rename = "jumlah_pengisian")]
    pub amount_filled: FieldValue,
    /// Derived from the following entry's reserve, except on the last row.
    #[serde(rename = "penggunaan_air")]
    pub amount_consumed: FieldValue,
    #[serde(rename = "pengisian_via")]
    pub supply_method: SupplyMethod,
    #[serde(rename = "harga_per_ton")]
    pub price_per_ton: FieldValue,
    #[serde(rename = "jumlah_harga")]
    pub total_price: FieldValue,
    pub port_time: String,
}

impl Default for FreshWaterEntry {
    fn default() -> Self {
        Self {
            id: RecordId::default(),
            no: 1,
            port: String::new(),
            date: String::new(),
            reserve_before: FieldValue::empty(),
            amount_filled: FieldValue::empty(),
            amount_consumed: FieldValue::empty(),
            supply_method: SupplyMethod::Quay,
            price_per_ton: FieldValue::empty(),
            total_price: FieldValue::empty(),
            port_time: String::new(),
        }
    }
}

/// Fresh-water report page: the entry table plus its header/footer figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FreshWaterData {
    pub entries: Vec<FreshWaterEntry>,

    #[serde(rename = "kapasitas_total_tangki")]
    pub tank_capacity: FieldValue,
    #[serde(rename = "sisa_air_dock")]
    pub dock_reserve: FieldValue,
    /// Closing reserve as entered on the report form.
    #[serde(rename = "sisa_air_akhir")]
    pub closing_reserve: FieldValue,
    #[serde(rename = "voyage_lalu_nomor")]
    pub previous_voyage_number: String,
    #[serde(rename = "voyage_lalu_sisa_air")]
    pub previous_voyage_reserve: FieldValue,

    #[serde(rename = "nakhoda")]
    pub captain_name: String,
    #[serde(rename = "nrp_nakhoda")]
    pub captain_id: String,
    #[serde(rename = "mualim_1")]
    pub chief_officer_name: String,
    #[serde(rename = "nrp_mualim_1")]
    pub chief_officer_id: String,

    #[serde(rename = "tempat_laporan")]
    pub report_place: String,
    #[serde(rename = "tanggal_laporan")]
    pub report_date: String,
}

impl Default for FreshWaterData {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            tank_capacity: FieldValue::empty(),
            dock_reserve: FieldValue::dash(),
            closing_reserve: FieldValue::empty(),
            previous_voyage_number: String::new(),
            previous_voyage_reserve: FieldValue::empty(),
            captain_name: String::new(),
            captain_id: String::new(),
            chief_officer_name: String::new(),
            chief_officer_id: String::new(),
            report_place: String::new(),
            report_date: String::new(),
        }
    }
}

/// Named archived copy of a full report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedReport {
    pub id: RecordId,
    pub name: String,
    /// Unix epoch milliseconds.
    #[serde(rename = "lastModified")]
    pub last_modified: i64,
    pub data: VoyageSnapshot,
}
