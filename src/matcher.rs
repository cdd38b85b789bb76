use crate::config::{ContactConfig, PracticeConfig};

/// Quick questions offered by the widget before the conversation starts.
/// Invoking one behaves exactly like typing it, with a shorter reply delay.
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What are Dr. Parmar's specializations?",
    "How to book an appointment?",
    "What is the hospital location?",
    "Emergency contact number?",
    "What conditions does Dr. Parmar treat?",
    "Dr. Parmar's experience and education?",
    "Hospital visiting hours?",
    "What to expect in consultation?",
];

// Categories are evaluated top to bottom; the first category with any
// keyword contained in the folded input wins. Keywords are lowercase.
const CONTACT_KEYWORDS: &[&str] = &["phone", "contact", "number"];
const LOCATION_KEYWORDS: &[&str] = &["location", "address", "where"];
const APPOINTMENT_KEYWORDS: &[&str] = &["appointment", "book", "schedule"];
const HOURS_KEYWORDS: &[&str] = &["hours", "timing", "when"];
const DOCTOR_KEYWORDS: &[&str] = &["doctor", "parmar", "about"];
const SPECIALTY_KEYWORDS: &[&str] = &["specialization", "specialty", "expert"];
const EDUCATION_KEYWORDS: &[&str] = &["education", "qualification", "nimhans"];
const TREATMENT_KEYWORDS: &[&str] = &["treatment", "condition", "surgery"];
const EMERGENCY_KEYWORDS: &[&str] = &["emergency", "urgent", "immediate"];
const HOSPITAL_KEYWORDS: &[&str] = &["hospital", "clinic", "center"];
const CONSULTATION_KEYWORDS: &[&str] = &["consultation", "visit", "expect"];
const COST_KEYWORDS: &[&str] = &["cost", "fee", "insurance", "payment"];

#[derive(Debug)]
struct TopicRule {
    keywords: &'static [&'static str],
    reply: String,
}

/// Maps free-text input to one canned reply. Total: unmatched input gets
/// the fallback reply, never an error.
#[derive(Debug)]
pub struct Responder {
    rules: Vec<TopicRule>,
    fallback: String,
    welcome: String,
}

impl Responder {
    /// Renders every reply template once against the practice record, so
    /// `respond` stays a pure lookup.
    pub fn new(practice: &PracticeConfig, contact: &ContactConfig) -> Self {
        let doctor = &practice.doctor_name;
        let phone = &contact.phone;
        let email = &contact.email;
        let address = &contact.address;
        let hours = &contact.hours;
        let specializations = practice.specializations.join(", ");
        let specialties = practice.specialties.join("\n• ");
        let hospitals = practice.hospitals.join("\n• ");
        let hospital_names = practice
            .hospitals
            .iter()
            .map(|h| h.split(" - ").next().unwrap_or(h.as_str()))
            .collect::<Vec<_>>()
            .join(", ");

        let rules = vec![
            TopicRule {
                keywords: CONTACT_KEYWORDS,
                reply: format!(
                    "📞 You can reach us at {phone} for appointments and general inquiries. \
                     For emergencies, we provide 24/7 support. You can also email us at {email}."
                ),
            },
            TopicRule {
                keywords: LOCATION_KEYWORDS,
                reply: format!(
                    "📍 {doctor} practices at {address}. We also have presence at multiple \
                     hospitals including {hospital_names}."
                ),
            },
            TopicRule {
                keywords: APPOINTMENT_KEYWORDS,
                reply: format!(
                    "📅 To book an appointment with {doctor}:\n\n1. Call us at {phone}\n\
                     2. Fill out the consultation form on our website\n\
                     3. We'll contact you within 24 hours to confirm\n\n\
                     For emergencies, we're available 24/7!"
                ),
            },
            TopicRule {
                keywords: HOURS_KEYWORDS,
                reply: format!(
                    "🕐 Our clinic hours are {hours}. However, {doctor} is available for \
                     emergency neurosurgical cases 24/7. Please call {phone} for urgent situations."
                ),
            },
            TopicRule {
                keywords: DOCTOR_KEYWORDS,
                reply: format!(
                    "👨‍⚕️ {doctor} is a distinguished Neurosurgeon and Spine Surgeon with:\n\n\
                     • {experience} of experience\n• {education}\n• {surgeries}\n\
                     • Specialist in {specializations}",
                    experience = practice.experience,
                    education = practice.education,
                    surgeries = practice.surgeries,
                ),
            },
            TopicRule {
                keywords: SPECIALTY_KEYWORDS,
                reply: format!(
                    "🧠 {doctor} specializes in:\n\n• {specialties}\n\n\
                     He is particularly renowned for complex brain and spine surgeries \
                     with minimally invasive techniques."
                ),
            },
            TopicRule {
                keywords: EDUCATION_KEYWORDS,
                reply: format!(
                    "🎓 {doctor}'s educational background:\n\n• MBBS - Medical College\n\
                     • MCh Neurosurgery - NIMHANS, Bangalore\n\
                     • Fellowship in Advanced Spine Surgery\n\n\
                     NIMHANS is India's premier neurosurgical institution, ensuring \
                     world-class training."
                ),
            },
            TopicRule {
                keywords: TREATMENT_KEYWORDS,
                reply: format!(
                    "🏥 {doctor} treats various neurological conditions including:\n\n\
                     • Brain tumors and neurological cancers\n\
                     • Spinal disorders and herniated discs\n\
                     • Head injuries and neurotrauma\n\
                     • Spinal stenosis and scoliosis\n\
                     • Emergency neurosurgical cases\n\
                     • Complex brain and spine surgeries\n\n\
                     All treatments use latest minimally invasive techniques when possible."
                ),
            },
            TopicRule {
                keywords: EMERGENCY_KEYWORDS,
                reply: format!(
                    "🚨 For neurological emergencies:\n\n• Call immediately: {phone}\n\
                     • 24/7 emergency support available\n\
                     • For life-threatening situations, call 911 first\n\
                     • {doctor} handles complex neurotrauma cases\n\n\
                     Don't hesitate to contact us for urgent neurological symptoms!"
                ),
            },
            TopicRule {
                keywords: HOSPITAL_KEYWORDS,
                reply: format!(
                    "🏥 {doctor} practices at multiple locations:\n\n• {hospitals}\n\n\
                     Primary location: {address}\n\n\
                     This ensures accessible, high-quality care throughout the region."
                ),
            },
            TopicRule {
                keywords: CONSULTATION_KEYWORDS,
                reply: format!(
                    "💭 During your consultation, you can expect:\n\n\
                     • Comprehensive neurological evaluation\n\
                     • Review of medical history and imaging\n\
                     • Detailed treatment plan discussion\n\
                     • All questions and concerns addressed\n\
                     • Clear explanation of procedures if needed\n\n\
                     {doctor} believes in thorough, compassionate patient care."
                ),
            },
            TopicRule {
                keywords: COST_KEYWORDS,
                reply: format!(
                    "💳 Payment & Insurance:\n\n• We accept most major insurance plans\n\
                     • Flexible payment options available\n\
                     • Cost varies based on treatment complexity\n\
                     • Insurance verification available\n\n\
                     Please call {phone} for specific cost information and insurance verification."
                ),
            },
        ];

        let fallback = format!(
            "I'd be happy to help! I can provide information about:\n\n\
             • {doctor}'s background and specializations\n\
             • Appointment booking and contact details\n\
             • Hospital locations and timings\n\
             • Treatment options and procedures\n\
             • Emergency care information\n\n\
             Could you please be more specific about what you'd like to know?"
        );

        let welcome = format!(
            "Hello! 👋 I'm {doctor}'s assistant. I can help you with information about \
             our neurosurgery services, appointments, and answer any questions you may \
             have. How can I assist you today?"
        );

        Self {
            rules,
            fallback,
            welcome,
        }
    }

    /// First matching category wins; ties between categories are resolved
    /// by table order. Empty input matches nothing and falls through.
    pub fn respond(&self, input: &str) -> &str {
        let folded = input.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| folded.contains(keyword)))
            .map(|rule| rule.reply.as_str())
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }
}
