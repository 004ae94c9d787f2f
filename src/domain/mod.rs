mod candidate_email;

pub use candidate_email::CandidateEmail;
