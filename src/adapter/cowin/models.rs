use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::domain::entities::center::{Center, Session};
use crate::domain::entities::region::District;

// Upstream numbers are not always typed consistently: pincode arrives as a
// JSON number, and capacities have been seen as floats and strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Str(String),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Int(n) => n.to_string(),
        Loose::Float(f) => f.to_string(),
        Loose::Str(s) => s,
    })
}

fn integer_like<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(deserializer)? {
        Loose::Int(n) => Ok(n),
        Loose::Float(f) => Ok(f.trunc() as i64),
        Loose::Str(s) => s.trim().parse::<i64>().map_err(de::Error::custom),
    }
}

fn age_like<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = integer_like(deserializer)?;
    u32::try_from(value).map_err(de::Error::custom)
}

// Response of GET admin/location/districts/{state_id}
#[derive(Debug, Deserialize)]
pub struct DistrictsResponse {
    #[serde(default)]
    pub districts: Vec<DistrictDto>,
}

#[derive(Debug, Deserialize)]
pub struct DistrictDto {
    pub district_id: u32,
    pub district_name: String,
}

// Response of GET appointment/sessions/public/calendarByDistrict
#[derive(Debug, Deserialize)]
pub struct CalendarResponse {
    #[serde(default)]
    pub centers: Vec<CenterDto>,
}

#[derive(Debug, Deserialize)]
pub struct CenterDto {
    pub name: String,
    pub district_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub pincode: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub fee_type: String,
    #[serde(default)]
    pub sessions: Vec<SessionDto>,
}

#[derive(Debug, Deserialize)]
pub struct SessionDto {
    pub date: String,
    #[serde(deserialize_with = "age_like")]
    pub min_age_limit: u32,
    #[serde(deserialize_with = "integer_like")]
    pub available_capacity: i64,
    #[serde(default)]
    pub vaccine: String,
}

impl From<DistrictDto> for District {
    fn from(dto: DistrictDto) -> Self {
        District {
            id: dto.district_id,
            name: dto.district_name,
        }
    }
}

impl From<SessionDto> for Session {
    fn from(dto: SessionDto) -> Self {
        Session {
            date: dto.date,
            min_age_limit: dto.min_age_limit,
            available_capacity: dto.available_capacity,
            vaccine: dto.vaccine,
        }
    }
}

impl From<CenterDto> for Center {
    fn from(dto: CenterDto) -> Self {
        Center {
            name: dto.name,
            pincode: dto.pincode,
            address: dto.address,
            fee_type: dto.fee_type,
            district_name: dto.district_name,
            sessions: dto.sessions.into_iter().map(Session::from).collect(),
        }
    }
}
