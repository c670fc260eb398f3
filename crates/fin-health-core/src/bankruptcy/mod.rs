pub mod altman;

pub use altman::{
    altman_z_score, bankruptcy_risk, calculate_altman_detail, classify_zone, estimate_pd,
    AltmanDetail, ZScoreComponent, ZScoreZone,
};
