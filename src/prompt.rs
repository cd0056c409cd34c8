use crate::profile::StudentProfile;

/// Builds the single instruction string sent to the generation endpoint:
/// a fixed mentor directive, the profile fields as labeled lines, and the
/// student's query. Pure and deterministic for a given profile.
pub fn build_mentor_prompt(profile: &StudentProfile, query: &str) -> String {
    format!(
        "You are a personalized student mentor chatbot. You know about the student's schedule, \
         marks, hobbies, likes, dislikes, and personal description. Always ground your responses \
         in the retrieved student data. If the data does not include something, give polite \
         general advice. Be supportive, encouraging, and practical.\n\n\
         Student Profile:\n\
         Name: {}\n\
         Schedule: {}\n\
         Academic Performance: {}\n\
         Interests: {}\n\
         Learning Preferences: {}\n\
         Learning Challenges: {}\n\
         Additional Info: {}\n\n\
         Student Query: {}\n\n\
         Please provide a helpful, personalized response based on this student's profile.",
        profile.name,
        profile.schedule,
        profile.formatted_marks(),
        profile.interests.join(", "),
        profile.likes.join(", "),
        profile.dislikes.join(", "),
        profile.description,
        query
    )
}
